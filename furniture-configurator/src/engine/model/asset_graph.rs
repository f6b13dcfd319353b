use crate::engine::model::scene_node::{AssetGeometry, AssetNode, LoadedAsset, MaterialRegistry};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use std::collections::HashSet;

/// Copy a loaded glTF into an engine-neutral node tree.
///
/// Top-level nodes (those no other node lists as a child) become children of
/// an unnamed root. A mesh with several primitives becomes one child node per
/// primitive, each carrying the parent node's name.
pub fn loaded_asset_from_gltf(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    meshes: &Assets<GltfMesh>,
) -> LoadedAsset {
    let materials = material_registry(
        &gltf.materials,
        gltf.named_materials
            .iter()
            .map(|(name, handle)| (name.as_ref(), handle)),
    );

    let child_ids: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter().map(Handle::id))
        .collect();

    let roots = gltf
        .nodes
        .iter()
        .filter(|handle| !child_ids.contains(&handle.id()))
        .filter_map(|handle| convert_node(handle, nodes, meshes))
        .collect();

    LoadedAsset {
        root: AssetNode::group("", roots),
        materials,
    }
}

fn convert_node(
    handle: &Handle<GltfNode>,
    nodes: &Assets<GltfNode>,
    meshes: &Assets<GltfMesh>,
) -> Option<AssetNode> {
    let Some(node) = nodes.get(handle) else {
        warn!("glTF node {:?} is not loaded, skipping", handle.id());
        return None;
    };

    let mut converted = AssetNode {
        name: node.name.clone(),
        transform: node.transform,
        geometry: None,
        children: Vec::new(),
    };

    if let Some(mesh) = node.mesh.as_ref().and_then(|mesh| meshes.get(mesh)) {
        match mesh.primitives.as_slice() {
            [single] => {
                converted.geometry = Some(AssetGeometry {
                    mesh: single.mesh.clone(),
                    material: single.material.clone(),
                });
            }
            primitives => {
                converted.children.extend(primitives.iter().map(|primitive| AssetNode {
                    name: node.name.clone(),
                    transform: Transform::IDENTITY,
                    geometry: Some(AssetGeometry {
                        mesh: primitive.mesh.clone(),
                        material: primitive.material.clone(),
                    }),
                    children: Vec::new(),
                }));
            }
        }
    }

    converted.children.extend(
        node.children
            .iter()
            .filter_map(|child| convert_node(child, nodes, meshes)),
    );
    Some(converted)
}

/// Registry in asset order. Materials without a name are registered under
/// an empty name so they still count as the first material.
pub fn material_registry<'a>(
    ordered: &[Handle<StandardMaterial>],
    named: impl Iterator<Item = (&'a str, &'a Handle<StandardMaterial>)>,
) -> MaterialRegistry {
    let named: Vec<(&str, &Handle<StandardMaterial>)> = named.collect();
    let mut registry = MaterialRegistry::default();
    for handle in ordered {
        let name = named
            .iter()
            .find(|(_, named_handle)| named_handle.id() == handle.id())
            .map(|(name, _)| *name)
            .unwrap_or_default();
        registry.push(name, handle.clone());
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_asset_order_and_names() {
        let mut materials = Assets::<StandardMaterial>::default();
        let metal = materials.add(StandardMaterial::default());
        let unnamed = materials.add(StandardMaterial::default());
        let wood = materials.add(StandardMaterial::default());
        let ordered = vec![metal.clone(), unnamed.clone(), wood.clone()];
        let named = [("wood", &wood), ("metal", &metal)];

        let registry = material_registry(&ordered, named.into_iter());

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.first(), Some(&metal));
        assert_eq!(registry.name_of(&unnamed), Some(""));
        assert_eq!(registry.by_exact("wood"), Some(&wood));
    }
}
