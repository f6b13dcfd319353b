/// Name fragment marking a material as the swappable wood surface.
pub const WOOD_KEYWORD: &str = "wood";

/// Name fragments painted black when a model forces metal parts black.
pub const METAL_BLACK_KEYWORDS: &[&str] = &["metal", "black"];

/// Accent used whenever no better colour can be determined.
pub const DEFAULT_ACCENT_HEX: &str = "#1e3a8a";

/// Base colour of the shared material given to geometry that resolves no material.
pub const FALLBACK_MATERIAL_RGB: [f32; 3] = [0.8, 0.8, 0.8];
