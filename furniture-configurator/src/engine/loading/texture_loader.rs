use crate::engine::assets::resource_cache::{ResourceStatus, resource_status};
use crate::engine::assets::texture_registry::{TextureDescriptor, TextureRegistry};
use crate::engine::materials::accent::{average_colour, default_accent};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Request every library texture up front so swaps are instant.
pub fn preload_textures(asset_server: Res<AssetServer>, mut registry: ResMut<TextureRegistry>) {
    for descriptor in TextureDescriptor::all() {
        registry.ensure_requested(descriptor.id, &asset_server);
    }
    info!("→ Preloading {} textures", registry.loads_started());
}

// Check requested textures and record the ones that resolved
pub fn check_texture_loading(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut registry: ResMut<TextureRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for (id, handle) in registry.unresolved() {
        match resource_status(&asset_server, handle.id()) {
            ResourceStatus::Pending => {}
            ResourceStatus::Ready => {
                let accent = images
                    .get(&handle)
                    .and_then(average_colour)
                    .unwrap_or_else(|| {
                        debug!("Texture '{}' has no readable pixels, using default accent", id);
                        default_accent()
                    });
                registry.mark_ready(id);
                registry.record_accent(id, accent);
                info!("✓ Texture ready: {}", id);
            }
            ResourceStatus::Failed => {
                registry.mark_missing(id);
                error!("Texture '{}' failed to decode", id);
                rpc_interface.send_notification("texture_missing", serde_json::json!({ "id": id }));
            }
        }
    }
}
