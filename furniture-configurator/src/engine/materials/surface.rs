use crate::engine::materials::classification::{
    ClassificationContext, MaterialRole, Paint, classify, paint_for,
};
use bevy::prelude::*;

/// The material properties a look is allowed to change. Everything else on a
/// loaded material stays as authored.
pub trait MaterialSurface {
    type Texture: Clone;

    fn has_texture_map(&self) -> bool;
    fn set_texture_map(&mut self, texture: Option<Self::Texture>);
    fn set_base_colour(&mut self, colour: Color);
    fn is_double_sided(&self) -> bool;
    fn make_double_sided(&mut self);
}

impl MaterialSurface for StandardMaterial {
    type Texture = Handle<Image>;

    fn has_texture_map(&self) -> bool {
        self.base_color_texture.is_some()
    }

    fn set_texture_map(&mut self, texture: Option<Handle<Image>>) {
        self.base_color_texture = texture;
    }

    fn set_base_colour(&mut self, colour: Color) {
        self.base_color = colour;
    }

    fn is_double_sided(&self) -> bool {
        self.double_sided && self.cull_mode.is_none()
    }

    fn make_double_sided(&mut self) {
        self.double_sided = true;
        self.cull_mode = None;
    }
}

/// Make a surface render and cast shadows from both faces. Returns whether
/// anything changed.
pub fn ensure_double_sided<S: MaterialSurface>(surface: &mut S) -> bool {
    if surface.is_double_sided() {
        return false;
    }
    surface.make_double_sided();
    true
}

/// Classify one material and apply its role. `texture` is the active surface
/// texture; when it is `None` wood surfaces keep whatever map they have.
pub fn apply_material_rules<S: MaterialSurface>(
    surface: &mut S,
    name: &str,
    context: &ClassificationContext,
    texture: Option<&S::Texture>,
) -> MaterialRole {
    ensure_double_sided(surface);

    let role = classify(name, surface.has_texture_map(), context);
    match paint_for(role, context) {
        Paint::SurfaceMap => {
            if let Some(texture) = texture {
                surface.set_texture_map(Some(texture.clone()));
            }
        }
        Paint::Tint(colour) => surface.set_base_colour(colour),
        Paint::Solid(colour) => {
            surface.set_texture_map(None);
            surface.set_base_colour(colour);
        }
        Paint::Keep => {}
    }
    role
}

/// A material in use by the mounted model, with the name rules match against.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBinding {
    pub name: String,
    pub handle: Handle<StandardMaterial>,
}

/// Run the rules over every bound material. Shared handles are processed once.
pub fn apply_to_materials(
    materials: &mut Assets<StandardMaterial>,
    bindings: &[MaterialBinding],
    context: &ClassificationContext,
    texture: Option<&Handle<Image>>,
) -> Vec<(String, MaterialRole)> {
    let mut seen = Vec::<AssetId<StandardMaterial>>::with_capacity(bindings.len());
    let mut roles = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let id = binding.handle.id();
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);

        let Some(material) = materials.get_mut(id) else {
            warn!("Material '{}' is not loaded, skipping", binding.name);
            continue;
        };
        let role = apply_material_rules(material, &binding.name, context, texture);
        roles.push((binding.name.clone(), role));
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::LayoutHints;
    use bevy::render::render_resource::Face;

    fn black_ctx() -> ClassificationContext {
        ClassificationContext::new(&LayoutHints::default(), None)
    }

    #[test]
    fn double_sided_fix_is_idempotent() {
        let mut material = StandardMaterial::default();
        assert_eq!(material.cull_mode, Some(Face::Back));

        assert!(ensure_double_sided(&mut material));
        assert!(!ensure_double_sided(&mut material));
        assert!(material.double_sided);
        assert_eq!(material.cull_mode, None);
    }

    #[test]
    fn wood_receives_selected_texture() {
        let mut images = Assets::<Image>::default();
        let texture = images.add(Image::default());
        let mut wood = StandardMaterial::default();

        let role = apply_material_rules(&mut wood, "wood", &black_ctx(), Some(&texture));

        assert_eq!(role, MaterialRole::Wood);
        assert_eq!(wood.base_color_texture, Some(texture));
        assert!(wood.double_sided);
    }

    #[test]
    fn forced_black_replaces_previous_texture() {
        let mut images = Assets::<Image>::default();
        let old = images.add(Image::default());
        let mut metal = StandardMaterial {
            base_color_texture: Some(old),
            ..default()
        };

        let role = apply_material_rules(&mut metal, "Metal_Frame", &black_ctx(), None);

        assert_eq!(role, MaterialRole::MetalOrBlack);
        assert_eq!(metal.base_color_texture, None);
        assert_eq!(metal.base_color, Color::BLACK);
    }

    #[test]
    fn accent_tints_without_dropping_authored_map() {
        let mut images = Assets::<Image>::default();
        let authored = images.add(Image::default());
        let accent = Color::srgb_u8(0xd2, 0xc1, 0x58);
        let layout = LayoutHints {
            accent_keywords: vec!["color".into()],
            ..default()
        };
        let ctx = ClassificationContext::new(&layout, Some(accent));
        let mut panel = StandardMaterial {
            base_color_texture: Some(authored.clone()),
            ..default()
        };

        let role = apply_material_rules(&mut panel, "color", &ctx, None);

        assert_eq!(role, MaterialRole::Accent);
        assert_eq!(panel.base_color, accent);
        assert_eq!(panel.base_color_texture, Some(authored));
    }

    #[test]
    fn texture_swap_only_changes_wood_maps() {
        let mut images = Assets::<Image>::default();
        let first = images.add(Image::default());
        let fourth = images.add(Image::default());
        let mut materials = Assets::<StandardMaterial>::default();
        let fabric_colour = Color::srgb(0.4, 0.2, 0.1);
        let bindings = vec![
            MaterialBinding {
                name: "wood".into(),
                handle: materials.add(StandardMaterial::default()),
            },
            MaterialBinding {
                name: "metal".into(),
                handle: materials.add(StandardMaterial::default()),
            },
            MaterialBinding {
                name: "fabric".into(),
                handle: materials.add(StandardMaterial::from(fabric_colour)),
            },
        ];
        let ctx = black_ctx();

        apply_to_materials(&mut materials, &bindings, &ctx, Some(&first));
        let roles = apply_to_materials(&mut materials, &bindings, &ctx, Some(&fourth));

        assert_eq!(
            roles.iter().map(|(_, role)| *role).collect::<Vec<_>>(),
            vec![
                MaterialRole::Wood,
                MaterialRole::MetalOrBlack,
                MaterialRole::Neutral
            ]
        );
        let wood = materials.get(&bindings[0].handle).unwrap();
        let metal = materials.get(&bindings[1].handle).unwrap();
        let fabric = materials.get(&bindings[2].handle).unwrap();
        assert_eq!(wood.base_color_texture, Some(fourth));
        assert_eq!(metal.base_color_texture, None);
        assert_eq!(metal.base_color, Color::BLACK);
        assert_eq!(fabric.base_color, fabric_colour);
        assert_eq!(fabric.base_color_texture, None);
    }

    #[test]
    fn shared_material_handles_are_processed_once() {
        let mut materials = Assets::<StandardMaterial>::default();
        let handle = materials.add(StandardMaterial::default());
        let bindings = vec![
            MaterialBinding {
                name: "wood".into(),
                handle: handle.clone(),
            },
            MaterialBinding {
                name: "wood".into(),
                handle,
            },
        ];

        let roles = apply_to_materials(&mut materials, &bindings, &black_ctx(), None);
        assert_eq!(roles.len(), 1);
    }
}
