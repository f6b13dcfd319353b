use crate::engine::assets::catalog::Catalog;
use crate::session::events::{SelectModel, SelectTexture, SelectionSource, TogglePanel};
use crate::session::state::ViewerSession;
use crate::shell::ar::ViewInAr;
use crate::shell::cart::AddToCart;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::texture::TEXTURE_LIBRARY;

const TEXTURE_KEYS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

#[cfg(not(target_arch = "wasm32"))]
#[derive(SystemParam)]
pub struct ShortcutWriters<'w> {
    models: EventWriter<'w, SelectModel>,
    textures: EventWriter<'w, SelectTexture>,
    panel: EventWriter<'w, TogglePanel>,
    ar: EventWriter<'w, ViewInAr>,
    cart: EventWriter<'w, AddToCart>,
}

/// Desktop keyboard shortcuts, mirroring the host page controls.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<Catalog>,
    session: Res<ViewerSession>,
    mut writers: ShortcutWriters,
) {
    let source = SelectionSource::Keyboard;

    for (key, texture) in TEXTURE_KEYS.iter().zip(TEXTURE_LIBRARY) {
        if keyboard.just_pressed(*key) {
            writers.textures.write(SelectTexture {
                id: texture.id.to_string(),
                source,
            });
        }
    }

    let step = match (
        keyboard.just_pressed(KeyCode::ArrowLeft),
        keyboard.just_pressed(KeyCode::ArrowRight),
    ) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    };
    if step != 0 {
        if let Some(next) = catalog.neighbour(session.active_model_id(), step) {
            writers.models.write(SelectModel {
                id: next.id.clone(),
                source,
            });
        }
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        writers.panel.write(TogglePanel { source });
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        writers.ar.write(ViewInAr { source });
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        writers.cart.write(AddToCart { source });
    }
}

/// Placeholder for WASM builds, where the host page drives selection over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn app() -> App {
        let catalog = Catalog::from_json_str(
            r#"{ "models": [
                { "id": "bedside", "display_name": "Bedside", "thumbnail_path": "b.jpg",
                  "asset": { "kind": "generic", "path": "b.glb" } },
                { "id": "microfridge", "display_name": "Microfridge", "thumbnail_path": "m.jpg",
                  "asset": { "kind": "generic", "path": "m.glb" } }
            ] }"#,
        )
        .unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<SelectModel>()
            .add_event::<SelectTexture>()
            .add_event::<TogglePanel>()
            .add_event::<ViewInAr>()
            .add_event::<AddToCart>()
            .insert_resource(ViewerSession::new(&catalog))
            .insert_resource(catalog)
            .add_systems(Update, handle_keyboard_shortcuts);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();
    }

    #[test]
    fn digit_keys_select_textures() {
        let mut app = app();
        press(&mut app, KeyCode::Digit4);

        let events = app.world().resource::<Events<SelectTexture>>();
        let ids: Vec<_> = events
            .iter_current_update_events()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["texture_4"]);
    }

    #[test]
    fn left_arrow_wraps_to_last_model() {
        let mut app = app();
        press(&mut app, KeyCode::ArrowLeft);

        let events = app.world().resource::<Events<SelectModel>>();
        let ids: Vec<_> = events
            .iter_current_update_events()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["microfridge"]);
    }
}
