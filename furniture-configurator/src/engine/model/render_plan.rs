use crate::engine::assets::catalog::{AssetReference, AuthoredPart};
use crate::engine::materials::surface::MaterialBinding;
use crate::engine::model::scene_node::{
    AssetNode, LoadedAsset, MaterialRegistry, SceneNode, find_node, walk, walk_subtree,
};
use bevy::prelude::*;

/// One mesh to spawn under the model root.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPart {
    pub node_name: String,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    /// Relative to the model root.
    pub transform: Transform,
}

/// Parts to spawn for an asset. Authored assets whose expected parts are not
/// all present are planned as generic assets instead.
pub fn plan_parts(
    asset: &LoadedAsset,
    reference: &AssetReference,
    fallback: &Handle<StandardMaterial>,
) -> Vec<RenderPart> {
    match reference {
        AssetReference::Authored { path, parts } => plan_authored(asset, parts, fallback)
            .unwrap_or_else(|| {
                warn!("Authored parts missing in '{}', using generic layout", path);
                plan_generic(asset, fallback)
            }),
        AssetReference::Generic { .. } => plan_generic(asset, fallback),
    }
}

/// Resolve each named part with its offset, or `None` if any part has no
/// geometry in the asset.
pub fn plan_authored(
    asset: &LoadedAsset,
    parts: &[AuthoredPart],
    fallback: &Handle<StandardMaterial>,
) -> Option<Vec<RenderPart>> {
    let mut planned = Vec::new();

    for part in parts {
        let (node, global) = find_node(&asset.root, &part.node)?;
        let offset = Transform::from_translation(Vec3::from_array(part.offset));
        let before = planned.len();

        walk_subtree(node, global, &mut |child, child_global| {
            if let Some(found) = geometry_part(child, child_global, &asset.materials, fallback) {
                planned.push(RenderPart {
                    transform: offset * found.transform,
                    ..found
                });
            }
        });

        if planned.len() == before {
            return None;
        }
    }
    Some(planned)
}

/// Every node with geometry, in walk order.
pub fn plan_generic(asset: &LoadedAsset, fallback: &Handle<StandardMaterial>) -> Vec<RenderPart> {
    let mut planned = Vec::new();
    walk(&asset.root, &mut |node, global| {
        planned.extend(geometry_part(node, global, &asset.materials, fallback));
    });
    planned
}

fn geometry_part(
    node: &AssetNode,
    global: Transform,
    registry: &MaterialRegistry,
    fallback: &Handle<StandardMaterial>,
) -> Option<RenderPart> {
    let geometry = node.geometry.as_ref()?;
    Some(RenderPart {
        node_name: node.name().to_string(),
        mesh: geometry.mesh.clone(),
        material: resolve_material(node.name(), node.material(), registry, fallback),
        transform: global,
    })
}

/// Material for a node: its own binding, then the registry by exact name,
/// then by substring, then the first registry entry, then `fallback`.
pub fn resolve_material(
    node_name: &str,
    bound: Option<&Handle<StandardMaterial>>,
    registry: &MaterialRegistry,
    fallback: &Handle<StandardMaterial>,
) -> Handle<StandardMaterial> {
    bound
        .or_else(|| registry.by_exact(node_name))
        .or_else(|| registry.by_substring(node_name))
        .or_else(|| registry.first())
        .unwrap_or(fallback)
        .clone()
}

/// Distinct materials used by the planned parts, named for classification.
/// The shared fallback material is never classified.
pub fn material_bindings(
    parts: &[RenderPart],
    registry: &MaterialRegistry,
    fallback: &Handle<StandardMaterial>,
) -> Vec<MaterialBinding> {
    let mut bindings: Vec<MaterialBinding> = Vec::new();
    for part in parts {
        if part.material.id() == fallback.id()
            || bindings.iter().any(|b| b.handle.id() == part.material.id())
        {
            continue;
        }
        let name = registry
            .name_of(&part.material)
            .filter(|name| !name.is_empty())
            .unwrap_or(&part.node_name);
        bindings.push(MaterialBinding {
            name: name.to_string(),
            handle: part.material.clone(),
        });
    }
    bindings
}
