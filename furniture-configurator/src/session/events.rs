use crate::engine::assets::catalog::Catalog;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::session::state::{SessionChange, ViewerSession, ViewportClass};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Where a selection request came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Rpc,
    Keyboard,
}

/// Request to show a different catalog model.
#[derive(Event, Debug, Clone)]
pub struct SelectModel {
    pub id: String,
    pub source: SelectionSource,
}

/// Request to switch the active surface texture.
#[derive(Event, Debug, Clone)]
pub struct SelectTexture {
    pub id: String,
    pub source: SelectionSource,
}

#[derive(Event, Debug, Clone)]
pub struct TogglePanel {
    pub source: SelectionSource,
}

/// Fired after any transition that changed the session.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionChanged {
    pub change: SessionChange,
}

/// Apply queued selection requests to the session in arrival order.
pub fn apply_selection_events(
    catalog: Res<Catalog>,
    mut session: ResMut<ViewerSession>,
    mut models: EventReader<SelectModel>,
    mut textures: EventReader<SelectTexture>,
    mut panel: EventReader<TogglePanel>,
    mut changed: EventWriter<SessionChanged>,
) {
    let mut change = SessionChange::default();

    for event in models.read() {
        debug!("Model selection '{}' via {:?}", event.id, event.source);
        change = change.merge(session.select_model(&catalog, &event.id));
    }
    for event in textures.read() {
        debug!("Texture selection '{}' via {:?}", event.id, event.source);
        change = change.merge(session.select_texture(&event.id));
    }
    for event in panel.read() {
        debug!("Panel toggled via {:?}", event.source);
        change = change.merge(session.toggle_panel());
    }

    if !change.is_empty() {
        changed.write(SessionChanged { change });
    }
}

/// Derive the layout class from the primary window's logical width.
pub fn track_viewport_class(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<ViewerSession>,
    mut changed: EventWriter<SessionChanged>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let class = ViewportClass::from_width(window.width());
    if class == session.viewport_class() {
        return;
    }
    let change = session.set_viewport_class(class);
    info!("→ Viewport class: {:?}", class);
    changed.write(SessionChanged { change });
}

/// Push the session snapshot to the host page whenever it changes.
pub fn notify_session_changes(
    mut events: EventReader<SessionChanged>,
    session: Res<ViewerSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if events.read().last().is_none() {
        return;
    }
    match serde_json::to_value(&*session) {
        Ok(snapshot) => rpc_interface.send_notification("session_changed", snapshot),
        Err(e) => error!("Failed to serialise session: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let catalog = Catalog::from_json_str(
            r#"{ "models": [
                { "id": "bedside", "display_name": "Bedside", "thumbnail_path": "b.jpg",
                  "asset": { "kind": "generic", "path": "models/BedsidePanel.glb" } },
                { "id": "headboard", "display_name": "Headboard", "thumbnail_path": "h.jpg",
                  "asset": { "kind": "generic", "path": "models/headboard.glb" } }
            ] }"#,
        )
        .unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<SelectModel>()
            .add_event::<SelectTexture>()
            .add_event::<TogglePanel>()
            .add_event::<SessionChanged>()
            .insert_resource(ViewerSession::new(&catalog))
            .insert_resource(catalog)
            .add_systems(Update, apply_selection_events);
        app
    }

    fn changes(app: &App) -> Vec<SessionChange> {
        app.world()
            .resource::<Events<SessionChanged>>()
            .iter_current_update_events()
            .map(|e| e.change)
            .collect()
    }

    #[test]
    fn selection_events_update_the_session() {
        let mut app = app();
        app.world_mut().send_event(SelectModel {
            id: "headboard".into(),
            source: SelectionSource::Rpc,
        });
        app.world_mut().send_event(SelectTexture {
            id: "texture_3".into(),
            source: SelectionSource::Keyboard,
        });
        app.update();

        let session = app.world().resource::<ViewerSession>();
        assert_eq!(session.active_model_id(), "headboard");
        assert_eq!(session.active_texture_id(), "texture_3");

        let changes = changes(&app);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].model && changes[0].texture);
    }

    #[test]
    fn no_op_selection_sends_nothing() {
        let mut app = app();
        app.world_mut().send_event(SelectModel {
            id: "bedside".into(),
            source: SelectionSource::Rpc,
        });
        app.world_mut().send_event(SelectModel {
            id: "wardrobe".into(),
            source: SelectionSource::Rpc,
        });
        app.update();

        assert!(changes(&app).is_empty());
        assert_eq!(app.world().resource::<ViewerSession>().generation(), 1);
    }
}
