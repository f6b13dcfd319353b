use crate::engine::assets::catalog::LayoutHints;
use bevy::prelude::*;
use constants::material::DEFAULT_ACCENT_HEX;
use constants::texture::ACCENT_SAMPLE_GRID;

pub fn parse_hex_colour(hex: &str) -> Option<Color> {
    Srgba::hex(hex.trim()).ok().map(Color::from)
}

pub fn default_accent() -> Color {
    parse_hex_colour(DEFAULT_ACCENT_HEX).unwrap_or(Color::srgb_u8(0x1e, 0x3a, 0x8a))
}

pub fn colour_to_hex(colour: Color) -> String {
    colour.to_srgba().to_hex()
}

/// Accent colour for a model under a texture, or `None` if the model has no
/// accent materials.
///
/// An explicit per-texture override wins, then the texture's sampled colour
/// (for models that follow the texture), then the fixed default.
pub fn resolve_accent(
    layout: &LayoutHints,
    texture_id: &str,
    sampled: Option<Color>,
) -> Option<Color> {
    if !layout.uses_accent() {
        return None;
    }

    let overridden = layout
        .accent_override_by_texture
        .as_ref()
        .and_then(|overrides| overrides.get(texture_id))
        .and_then(|hex| {
            let colour = parse_hex_colour(hex);
            if colour.is_none() {
                warn!("Ignoring malformed accent '{}' for {}", hex, texture_id);
            }
            colour
        });

    let from_texture = sampled.filter(|_| layout.accent_from_texture);

    Some(overridden.or(from_texture).unwrap_or_else(default_accent))
}

/// Mean colour of an image over an evenly spaced sampling grid. `None` when
/// the pixels cannot be read on the CPU.
pub fn average_colour(image: &Image) -> Option<Color> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return None;
    }

    let grid = ACCENT_SAMPLE_GRID;
    let mut samples = Vec::with_capacity((grid * grid) as usize);
    for gy in 0..grid {
        for gx in 0..grid {
            let x = ((2 * gx + 1) * width / (2 * grid)).min(width - 1);
            let y = ((2 * gy + 1) * height / (2 * grid)).min(height - 1);
            let colour = image.get_color_at(x, y).ok()?;
            samples.push(colour.to_srgba());
        }
    }
    mean_srgba(&samples).map(Color::from)
}

fn mean_srgba(samples: &[Srgba]) -> Option<Srgba> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as f32;
    let (r, g, b) = samples.iter().fold((0.0, 0.0, 0.0), |(r, g, b), s| {
        (r + s.red, g + s.green, b + s.blue)
    });
    Some(Srgba::rgb(r / count, g / count, b / count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::render_asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
    use std::collections::HashMap;

    fn tv_layout() -> LayoutHints {
        LayoutHints {
            accent_keywords: vec!["color".into()],
            accent_fallback: true,
            accent_override_by_texture: Some(HashMap::from([
                ("texture_2".to_string(), "#d2c158".to_string()),
                ("texture_5".to_string(), "not-a-colour".to_string()),
            ])),
            ..default()
        }
    }

    #[test]
    fn models_without_accent_materials_get_none() {
        assert_eq!(
            resolve_accent(&LayoutHints::default(), "texture_1", Some(Color::WHITE)),
            None
        );
    }

    #[test]
    fn override_then_default() {
        let layout = tv_layout();
        assert_eq!(
            resolve_accent(&layout, "texture_2", None),
            parse_hex_colour("#d2c158")
        );
        assert_eq!(
            resolve_accent(&layout, "texture_5", None),
            Some(default_accent())
        );
        assert_eq!(
            resolve_accent(&layout, "texture_3", Some(Color::WHITE)),
            Some(default_accent())
        );
    }

    #[test]
    fn sampled_colour_used_only_when_following_texture() {
        let layout = LayoutHints {
            accent_keywords: vec!["color".into()],
            accent_from_texture: true,
            ..default()
        };
        let sampled = Color::srgb(0.5, 0.25, 0.125);

        assert_eq!(resolve_accent(&layout, "texture_1", Some(sampled)), Some(sampled));
        assert_eq!(
            resolve_accent(&layout, "texture_1", None),
            Some(default_accent())
        );
    }

    #[test]
    fn average_of_a_solid_image() {
        let image = Image::new_fill(
            Extent3d {
                width: 8,
                height: 4,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[255, 0, 0, 255],
            TextureFormat::Rgba8Unorm,
            RenderAssetUsages::default(),
        );

        let average = average_colour(&image).unwrap().to_srgba();
        assert!((average.red - 1.0).abs() < 1e-4);
        assert!(average.green.abs() < 1e-4);
        assert!(average.blue.abs() < 1e-4);
    }

    #[test]
    fn default_accent_hex_round_trips() {
        assert_eq!(colour_to_hex(default_accent()), "#1E3A8A");
    }
}
