//! Catalog data and cached asset loads.
//!
//! Holds the model catalog read from JSON, the library of swappable surface
//! textures, and the per-path load cache shared by model and texture loads.

/// Model catalog entries, layout hints and catalog validation.
pub mod catalog;

/// Path-keyed load cache and asset server load state polling.
pub mod resource_cache;

/// Surface texture library with sRGB decoding and sampled accent colours.
pub mod texture_registry;
