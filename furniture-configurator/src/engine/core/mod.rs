//! Core application setup and state management.
//!
//! Builds the app, orders the viewer systems and moves from catalog loading
//! to the running viewer on both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Registers the catalog asset type, viewer events, resources and the
/// ordered runtime systems.
pub mod app_setup;

/// Application states, the runtime system sets and the loading transition.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
