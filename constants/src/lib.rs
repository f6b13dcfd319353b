//! Shared constants for the furniture configurator.
//!
//! Fixed data that is baked into the build: the swappable texture library,
//! material naming keywords, camera and layout defaults, and asset paths.

/// Material naming keywords and default tint colours.
pub mod material;

/// Asset paths relative to the Bevy asset root.
pub mod path;

/// Camera, viewport and lighting defaults.
pub mod render_settings;

/// The fixed library of swappable surface textures.
pub mod texture;
