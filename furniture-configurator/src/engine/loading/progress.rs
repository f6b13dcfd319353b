use crate::engine::assets::texture_registry::TextureRegistry;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub catalog_loaded: bool,
    pub textures_resolved: usize,
    pub textures_requested: usize,
    reported: Option<(bool, usize, usize)>,
}

impl LoadingProgress {
    fn snapshot(&self) -> (bool, usize, usize) {
        (
            self.catalog_loaded,
            self.textures_resolved,
            self.textures_requested,
        )
    }

    /// Whether the state differs from the last one sent to the host page.
    /// Marks the current state as sent.
    fn take_changed(&mut self) -> bool {
        let current = self.snapshot();
        if self.reported == Some(current) {
            return false;
        }
        self.reported = Some(current);
        true
    }
}

/// Push loading progress to the host page whenever it moves.
pub fn update_loading_frontend(
    mut loading_progress: ResMut<LoadingProgress>,
    registry: Res<TextureRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let (resolved, requested) = registry.progress();
    loading_progress.textures_resolved = resolved;
    loading_progress.textures_requested = requested;

    if loading_progress.take_changed() {
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({
                "catalog_loaded": loading_progress.catalog_loaded,
                "textures_resolved": resolved,
                "textures_total": requested,
            }),
        );
    }
}
