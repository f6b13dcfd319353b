//! Furniture model loading, mounting and material binding.
//!
//! A selected catalog entry is loaded as a glTF, copied into a neutral node
//! tree, planned into spawnable parts (authored named parts or a generic walk
//! of all geometry) and spawned under one root entity. Material rules run on
//! the mounted model whenever the active texture or accent changes.

/// Model adapter resource and the load, mount and material pass systems.
pub mod adapter;

/// glTF to neutral node tree conversion.
pub mod asset_graph;

/// Generation-tagged queue of in-flight model loads.
pub mod mount_queue;

/// Part planning and material resolution for authored and generic assets.
pub mod render_plan;

/// Node visitor trait, neutral node tree and material registry.
pub mod scene_node;
