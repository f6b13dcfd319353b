//! Material rules applied to loaded furniture models.
//!
//! Each material of a mounted model is classified by name into a role
//! (textured wood, black metal, accent tint or untouched), and the role
//! decides how its base colour and surface map are rewritten.

/// Accent colour resolution from per-texture overrides and sampled texture colour.
pub mod accent;

/// Name-based material role classification.
pub mod classification;

/// In-place material mutation behind the `MaterialSurface` seam.
pub mod surface;
