use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::CATALOG_EXTENSION;
use constants::render_settings::{INITIAL_CAMERA_POSITION, INITIAL_ORBIT_TARGET_Y};
// Crate engine modules
use crate::engine::assets::catalog::{CatalogManifest, OrbitLimits};
use crate::engine::assets::texture_registry::TextureRegistry;
use crate::engine::camera::orbit_camera::{
    OrbitCamera, fov_for, orbit_camera_controller, update_camera_fov,
};
use crate::engine::core::app_state::{AppState, ViewerSet, catalog_ready, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{CatalogLoader, load_catalog_system, start_loading};
use crate::engine::loading::progress::{LoadingProgress, update_loading_frontend};
use crate::engine::loading::texture_loader::{check_texture_loading, preload_textures};
use crate::engine::model::adapter::{
    ModelAdapter, ModelMounted, apply_active_look, request_active_model, resolve_model_loads,
};
use crate::engine::scene::composition::{fit_camera_to_mounted_model, spawn_lighting};
use crate::engine::systems::host_notifications::model_mounted_notification_system;
// Session and shell
use crate::session::events::{
    SelectModel, SelectTexture, SessionChanged, TogglePanel, apply_selection_events,
    notify_session_changes, track_viewport_class,
};
use crate::session::shortcuts::handle_keyboard_shortcuts;
use crate::session::state::ViewportClass;
use crate::shell::ar::{ViewInAr, handle_ar_requests};
use crate::shell::cart::{AddToCart, handle_add_to_cart};
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::status_overlay::{spawn_status_overlay, update_status_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers the catalog manifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<CatalogManifest>::new(&[CATALOG_EXTENSION]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::WHITE));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<CatalogLoader>()
        .init_resource::<TextureRegistry>()
        .init_resource::<ModelAdapter>()
        .add_event::<SelectModel>()
        .add_event::<SelectTexture>()
        .add_event::<TogglePanel>()
        .add_event::<SessionChanged>()
        .add_event::<ModelMounted>()
        .add_event::<ViewInAr>()
        .add_event::<AddToCart>();

    app.configure_sets(
        Update,
        (
            ViewerSet::Input,
            ViewerSet::Session,
            ViewerSet::Mount,
            ViewerSet::Materials,
            ViewerSet::Camera,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // State-based system scheduling
    app.add_systems(
        Startup,
        (setup, spawn_lighting, start_loading, preload_textures).chain(),
    )
    .add_systems(
        Update,
        (load_catalog_system, transition_to_running.run_if(catalog_ready))
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(Update, (check_texture_loading, update_loading_frontend).chain());

    // Runtime systems, ordered by viewer set
    app.add_systems(
        Update,
        (
            (handle_keyboard_shortcuts, track_viewport_class).in_set(ViewerSet::Input),
            (apply_selection_events, handle_ar_requests, handle_add_to_cart)
                .chain()
                .in_set(ViewerSet::Session),
            (request_active_model, resolve_model_loads)
                .chain()
                .in_set(ViewerSet::Mount),
            apply_active_look.in_set(ViewerSet::Materials),
            (
                fit_camera_to_mounted_model,
                orbit_camera_controller,
                update_camera_fov,
                notify_session_changes,
                model_mounted_notification_system,
            )
                .chain()
                .in_set(ViewerSet::Camera),
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_status_overlay).add_systems(
            Update,
            update_status_overlay.in_set(ViewerSet::Camera),
        );
    }

    app
}

fn spawn_camera(commands: &mut Commands) {
    let position = Vec3::from(INITIAL_CAMERA_POSITION);
    let focus = Vec3::new(0.0, INITIAL_ORBIT_TARGET_Y, 0.0);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: fov_for(ViewportClass::Desktop),
            ..default()
        }),
        Transform::from_translation(position).looking_at(focus, Vec3::Y),
    ));
    commands.insert_resource(OrbitCamera::from_position(
        position,
        focus,
        OrbitLimits::default(),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    info!("=== FURNITURE CONFIGURATOR ===");
    spawn_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
