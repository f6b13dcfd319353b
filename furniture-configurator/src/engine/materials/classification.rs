use crate::engine::assets::catalog::LayoutHints;
use bevy::prelude::*;
use constants::material::{METAL_BLACK_KEYWORDS, WOOD_KEYWORD};

/// Role a material plays in the current look. Recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    /// Receives the selected texture as its surface map.
    Wood,
    /// Painted pure black.
    MetalOrBlack,
    /// Painted with the accent colour.
    Accent,
    /// Left as authored.
    Neutral,
}

/// What a role does to a material's paint and surface map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Keep,
    SurfaceMap,
    /// Base colour only; an authored map is kept.
    Tint(Color),
    /// Flat colour with the surface map removed.
    Solid(Color),
}

/// Per-model inputs to classification. Keywords are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationContext {
    pub force_metal_black: bool,
    pub extra_black_keywords: Vec<String>,
    pub accent_keywords: Vec<String>,
    pub accent_colour: Option<Color>,
    pub accent_fallback: bool,
}

impl ClassificationContext {
    pub fn new(layout: &LayoutHints, accent_colour: Option<Color>) -> Self {
        Self {
            force_metal_black: layout.force_metal_black,
            extra_black_keywords: normalise_keywords(&layout.extra_black_keywords),
            accent_keywords: normalise_keywords(&layout.accent_keywords),
            accent_colour,
            accent_fallback: layout.accent_fallback,
        }
    }

    fn is_black(&self, name: &str) -> bool {
        METAL_BLACK_KEYWORDS.iter().any(|k| name.contains(k))
            || self.extra_black_keywords.iter().any(|k| name.contains(k.as_str()))
    }

    fn is_accent(&self, name: &str) -> bool {
        self.accent_keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

// An empty keyword would match every name.
fn normalise_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Decide the role of one material. Rules are tried in order and the first
/// match wins:
///
/// 1. accent colour present and name contains an accent keyword: `Accent`
/// 2. metal/black forcing enabled and name contains a black keyword: `MetalOrBlack`
/// 3. accent fallback enabled with an accent colour, no texture map and a
///    non-wood name: `Accent`
/// 4. name contains `wood`: `Wood`
/// 5. anything else: `Neutral`
pub fn classify(
    material_name: &str,
    has_texture_map: bool,
    context: &ClassificationContext,
) -> MaterialRole {
    let name = material_name.to_lowercase();
    let has_accent = context.accent_colour.is_some();
    let is_wood = name.contains(WOOD_KEYWORD);

    if has_accent && context.is_accent(&name) {
        MaterialRole::Accent
    } else if context.force_metal_black && context.is_black(&name) {
        MaterialRole::MetalOrBlack
    } else if context.accent_fallback && has_accent && !has_texture_map && !is_wood {
        MaterialRole::Accent
    } else if is_wood {
        MaterialRole::Wood
    } else {
        MaterialRole::Neutral
    }
}

pub fn paint_for(role: MaterialRole, context: &ClassificationContext) -> Paint {
    match role {
        MaterialRole::Wood => Paint::SurfaceMap,
        MaterialRole::MetalOrBlack => Paint::Solid(Color::BLACK),
        MaterialRole::Accent => context
            .accent_colour
            .map(Paint::Tint)
            .unwrap_or(Paint::Keep),
        MaterialRole::Neutral => Paint::Keep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accent() -> Color {
        Color::srgb_u8(0x1e, 0x3a, 0x8a)
    }

    fn forced_black() -> ClassificationContext {
        ClassificationContext::new(&LayoutHints::default(), None)
    }

    #[test]
    fn wood_and_metal_names() {
        let ctx = forced_black();
        assert_eq!(classify("Oak_Wood", true, &ctx), MaterialRole::Wood);
        assert_eq!(classify("METAL_legs", false, &ctx), MaterialRole::MetalOrBlack);
        assert_eq!(classify("fabric", false, &ctx), MaterialRole::Neutral);
    }

    #[test]
    fn black_rule_outranks_wood() {
        let ctx = forced_black();
        assert_eq!(classify("blackwood", true, &ctx), MaterialRole::MetalOrBlack);

        let relaxed = ClassificationContext {
            force_metal_black: false,
            ..forced_black()
        };
        assert_eq!(classify("blackwood", true, &relaxed), MaterialRole::Wood);
    }

    #[test]
    fn accent_keyword_beats_forced_black() {
        let layout = LayoutHints {
            accent_keywords: vec!["Color".into()],
            ..default()
        };
        let ctx = ClassificationContext::new(&layout, Some(accent()));

        assert_eq!(classify("black_color_trim", false, &ctx), MaterialRole::Accent);
        assert_eq!(classify("metal_color", false, &ctx), MaterialRole::Accent);
        assert_eq!(classify("Metal_Color", true, &ctx), MaterialRole::Accent);
        assert_eq!(classify("metal_frame", false, &ctx), MaterialRole::MetalOrBlack);
        assert_eq!(paint_for(MaterialRole::Accent, &ctx), Paint::Tint(accent()));
    }

    #[test]
    fn accent_keyword_needs_a_colour() {
        let layout = LayoutHints {
            accent_keywords: vec!["color".into()],
            ..default()
        };
        let ctx = ClassificationContext::new(&layout, None);
        assert_eq!(classify("color_panel", false, &ctx), MaterialRole::Neutral);
    }

    #[test]
    fn fallback_accent_skips_textured_and_wood_materials() {
        let layout = LayoutHints {
            accent_fallback: true,
            force_metal_black: false,
            ..default()
        };
        let ctx = ClassificationContext::new(&layout, Some(accent()));

        assert_eq!(classify("Material.003", false, &ctx), MaterialRole::Accent);
        assert_eq!(classify("Material.003", true, &ctx), MaterialRole::Neutral);
        assert_eq!(classify("wood", false, &ctx), MaterialRole::Wood);
    }

    #[test]
    fn extra_black_keywords_are_case_insensitive_and_blank_ones_ignored() {
        let layout = LayoutHints {
            extra_black_keywords: vec!["Frame".into(), "  ".into(), String::new()],
            ..default()
        };
        let ctx = ClassificationContext::new(&layout, None);

        assert_eq!(ctx.extra_black_keywords, vec!["frame".to_string()]);
        assert_eq!(classify("TV_FRAME", false, &ctx), MaterialRole::MetalOrBlack);
        assert_eq!(classify("glass", false, &ctx), MaterialRole::Neutral);
    }

    #[test]
    fn paint_per_role() {
        let ctx = forced_black();
        assert_eq!(paint_for(MaterialRole::Wood, &ctx), Paint::SurfaceMap);
        assert_eq!(
            paint_for(MaterialRole::MetalOrBlack, &ctx),
            Paint::Solid(Color::BLACK)
        );
        assert_eq!(paint_for(MaterialRole::Neutral, &ctx), Paint::Keep);
    }
}
