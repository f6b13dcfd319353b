use crate::engine::assets::catalog::Catalog;
use crate::session::state::ViewerSession;
use bevy::prelude::*;

const SHORTCUT_HINT: &str = "1-5 texture   ←/→ model   Tab panel   R AR   Enter cart";

#[derive(Component)]
pub struct StatusText;

/// Text panel standing in for the host page controls on native builds.
pub fn spawn_status_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.1, 0.1, 0.1)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

pub fn status_line(session: &ViewerSession, catalog: &Catalog) -> String {
    let model = catalog
        .get(session.active_model_id())
        .map_or(session.active_model_id(), |entry| entry.display_name.as_str());
    format!(
        "{}  |  {}\n{}",
        model,
        session.active_texture_id(),
        SHORTCUT_HINT
    )
}

/// The panel flag shows or hides the overlay.
pub fn update_status_overlay(
    session: Res<ViewerSession>,
    catalog: Res<Catalog>,
    mut query: Query<(&mut Text, &mut Visibility), With<StatusText>>,
) {
    if !session.is_changed() {
        return;
    }
    for (mut text, mut visibility) in &mut query {
        text.0 = status_line(&session, &catalog);
        *visibility = if session.panel_open() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_uses_display_name() {
        let catalog = Catalog::builtin().unwrap();
        let session = ViewerSession::new(&catalog);
        let line = status_line(&session, &catalog);

        let entry = catalog.get(session.active_model_id()).unwrap();
        assert!(line.starts_with(&entry.display_name));
        assert!(line.contains("texture_1"));
    }
}
