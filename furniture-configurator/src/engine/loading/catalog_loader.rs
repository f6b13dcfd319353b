use crate::engine::assets::catalog::{Catalog, CatalogError, CatalogManifest};
use crate::engine::assets::resource_cache::{ResourceStatus, resource_status};
use crate::engine::loading::progress::LoadingProgress;
use crate::session::state::ViewerSession;
use bevy::prelude::*;
use constants::path::CATALOG_PATH;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<CatalogManifest>>,
}

// Start the loading process
pub fn start_loading(mut catalog_loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("→ Loading catalog from: {}", CATALOG_PATH);
    catalog_loader.handle = Some(asset_server.load(CATALOG_PATH));
}

/// Validate the served catalog, or fall back to the built-in one when it
/// cannot be loaded or holds no usable entries.
pub fn load_catalog_system(
    mut loading_progress: ResMut<LoadingProgress>,
    catalog_loader: Res<CatalogLoader>,
    manifests: Res<Assets<CatalogManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if loading_progress.catalog_loaded {
        return;
    }
    let Some(handle) = &catalog_loader.handle else {
        return;
    };

    let served = match manifests.get(handle) {
        Some(manifest) => Catalog::from_manifest(manifest),
        None => match resource_status(&asset_server, handle.id()) {
            ResourceStatus::Failed => {
                warn!("Catalog '{}' could not be loaded", CATALOG_PATH);
                Err(CatalogError::Empty)
            }
            _ => return,
        },
    };

    let catalog = match served.or_else(|e| {
        warn!("Using built-in catalog ({})", e);
        Catalog::builtin()
    }) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("No usable catalog: {}", e);
            return;
        }
    };

    info!("✓ Catalog loaded: {} models", catalog.entries().len());
    commands.insert_resource(ViewerSession::new(&catalog));
    commands.insert_resource(catalog);
    loading_progress.catalog_loaded = true;
}
