//! Startup loading for the catalog and the texture library.
//!
//! The catalog gates the transition to the running state. Textures keep
//! resolving in the background and report progress to the host page.

/// Catalog manifest loading with a built-in fallback.
///
/// Inserts the validated catalog and the initial viewer session.
pub mod catalog_loader;

/// Loading progress tracking and host page reporting.
pub mod progress;

/// Texture preloading and load state monitoring.
///
/// Marks textures ready or missing and samples their average colour.
pub mod texture_loader;
