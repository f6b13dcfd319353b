/// Catalog manifest, loaded through the JSON asset loader.
pub const CATALOG_PATH: &str = "catalog.json";

/// File extension registered for catalog manifests.
pub const CATALOG_EXTENSION: &str = "json";

/// Model selected when a session starts. Falls back to the first catalog entry.
pub const DEFAULT_MODEL_ID: &str = "bedside";

/// Directory the asset root is served from on the web, relative to the page origin.
pub const WEB_ASSET_ROOT: &str = "assets";
