use bevy::prelude::*;

/// Read-only view of one node in a loaded model graph. Classification and
/// part lookup only ever see models through this trait.
pub trait SceneNode: Sized {
    type Material;

    fn name(&self) -> &str;
    fn local_transform(&self) -> Transform;
    fn has_geometry(&self) -> bool;
    fn material(&self) -> Option<&Self::Material>;
    fn children(&self) -> &[Self];
}

/// Depth-first pre-order walk, handing each node its transform relative to
/// the walk root.
pub fn walk<N: SceneNode>(root: &N, visit: &mut impl FnMut(&N, Transform)) {
    walk_from(root, Transform::IDENTITY, visit);
}

fn walk_from<N: SceneNode>(node: &N, parent: Transform, visit: &mut impl FnMut(&N, Transform)) {
    walk_subtree(node, parent * node.local_transform(), visit);
}

/// Walk below a node whose transform relative to the walk root is already known.
pub fn walk_subtree<N: SceneNode>(node: &N, global: Transform, visit: &mut impl FnMut(&N, Transform)) {
    visit(node, global);
    for child in node.children() {
        walk_from(child, global, visit);
    }
}

/// First node named exactly `name`, with its transform relative to `root`.
pub fn find_node<'a, N: SceneNode>(root: &'a N, name: &str) -> Option<(&'a N, Transform)> {
    find_from(root, name, Transform::IDENTITY)
}

fn find_from<'a, N: SceneNode>(
    node: &'a N,
    name: &str,
    parent: Transform,
) -> Option<(&'a N, Transform)> {
    let global = parent * node.local_transform();
    if node.name() == name {
        return Some((node, global));
    }
    node.children()
        .iter()
        .find_map(|child| find_from(child, name, global))
}

/// Geometry carried by a node: one mesh primitive and its bound material.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetGeometry {
    pub mesh: Handle<Mesh>,
    pub material: Option<Handle<StandardMaterial>>,
}

/// Engine-neutral copy of a loaded glTF node tree.
#[derive(Debug, Clone, Default)]
pub struct AssetNode {
    pub name: String,
    pub transform: Transform,
    pub geometry: Option<AssetGeometry>,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    pub fn group(name: impl Into<String>, children: Vec<AssetNode>) -> Self {
        Self {
            name: name.into(),
            children,
            ..default()
        }
    }
}

impl SceneNode for AssetNode {
    type Material = Handle<StandardMaterial>;

    fn name(&self) -> &str {
        &self.name
    }

    fn local_transform(&self) -> Transform {
        self.transform
    }

    fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    fn material(&self) -> Option<&Handle<StandardMaterial>> {
        self.geometry.as_ref().and_then(|g| g.material.as_ref())
    }

    fn children(&self) -> &[AssetNode] {
        &self.children
    }
}

/// Materials of a loaded model in asset order, addressable by name.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    entries: Vec<(String, Handle<StandardMaterial>)>,
}

impl MaterialRegistry {
    pub fn push(&mut self, name: impl Into<String>, handle: Handle<StandardMaterial>) {
        self.entries.push((name.into(), handle));
    }

    pub fn by_exact(&self, name: &str) -> Option<&Handle<StandardMaterial>> {
        self.entries
            .iter()
            .find(|(material, _)| material == name)
            .map(|(_, handle)| handle)
    }

    /// Case-insensitive match where either name contains the other. Unnamed
    /// nodes and materials never match.
    pub fn by_substring(&self, node_name: &str) -> Option<&Handle<StandardMaterial>> {
        let node = node_name.to_lowercase();
        if node.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(material, _)| {
                let material = material.to_lowercase();
                !material.is_empty() && (material.contains(&node) || node.contains(&material))
            })
            .map(|(_, handle)| handle)
    }

    pub fn first(&self) -> Option<&Handle<StandardMaterial>> {
        self.entries.first().map(|(_, handle)| handle)
    }

    pub fn name_of(&self, handle: &Handle<StandardMaterial>) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, h)| h.id() == handle.id())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A model as handed to the adapter: its node tree and material registry.
#[derive(Debug, Clone, Default)]
pub struct LoadedAsset {
    pub root: AssetNode,
    pub materials: MaterialRegistry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, meshes: &mut Assets<Mesh>, x: f32) -> AssetNode {
        AssetNode {
            name: name.into(),
            transform: Transform::from_xyz(x, 0.0, 0.0),
            geometry: Some(AssetGeometry {
                mesh: meshes.add(Cuboid::default()),
                material: None,
            }),
            children: Vec::new(),
        }
    }

    #[test]
    fn walk_visits_pre_order_with_accumulated_transforms() {
        let mut meshes = Assets::<Mesh>::default();
        let mut root = AssetNode::group("root", vec![leaf("a", &mut meshes, 1.0)]);
        root.transform = Transform::from_xyz(0.0, 2.0, 0.0);
        root.children.push(AssetNode::group("b", vec![leaf("c", &mut meshes, 3.0)]));

        let mut visited = Vec::new();
        walk(&root, &mut |node: &AssetNode, global| {
            visited.push((node.name.clone(), global.translation));
        });

        let names: Vec<_> = visited.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["root", "a", "b", "c"]);
        assert_eq!(visited[3].1, Vec3::new(3.0, 2.0, 0.0));

        let (found, global) = find_node(&root, "a").unwrap();
        assert!(found.has_geometry());
        assert_eq!(global.translation, Vec3::new(1.0, 2.0, 0.0));
        assert!(find_node(&root, "missing").is_none());
    }

    #[test]
    fn registry_lookups() {
        let mut materials = Assets::<StandardMaterial>::default();
        let oak = materials.add(StandardMaterial::default());
        let legs = materials.add(StandardMaterial::default());
        let mut registry = MaterialRegistry::default();
        registry.push("", materials.add(StandardMaterial::default()));
        registry.push("Oak_Wood", oak.clone());
        registry.push("legs", legs.clone());

        assert_eq!(registry.by_exact("legs"), Some(&legs));
        assert_eq!(registry.by_substring("wood"), Some(&oak));
        assert_eq!(registry.by_substring("Table_Legs_01"), Some(&legs));
        assert_eq!(registry.by_substring(""), None);
        assert_eq!(registry.name_of(&oak), Some("Oak_Wood"));
        assert_eq!(registry.len(), 3);
    }
}
