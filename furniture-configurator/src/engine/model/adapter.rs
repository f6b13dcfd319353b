use crate::engine::assets::catalog::{Catalog, ModelCatalogEntry};
use crate::engine::assets::resource_cache::{ResourceCache, resource_status};
use crate::engine::assets::texture_registry::{TextureRegistry, TextureStatus};
use crate::engine::materials::accent::{colour_to_hex, resolve_accent};
use crate::engine::materials::classification::ClassificationContext;
use crate::engine::materials::surface::{MaterialBinding, apply_to_materials};
use crate::engine::model::asset_graph::loaded_asset_from_gltf;
use crate::engine::model::mount_queue::{MountOutcome, MountQueue};
use crate::engine::model::render_plan::{RenderPart, material_bindings, plan_parts};
use crate::engine::scene::composition::compose_transform;
use crate::session::events::SessionChanged;
use crate::session::state::ViewerSession;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use constants::material::FALLBACK_MATERIAL_RGB;
use std::collections::HashSet;

/// Root entity of the mounted model. Carries the layout transform.
#[derive(Component)]
pub struct MountedModelRoot;

#[derive(Component)]
pub struct ModelPart;

/// Texture and accent last applied to the mounted model's materials.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedLook {
    pub texture_id: String,
    pub texture: Option<Handle<Image>>,
    pub accent: Option<Color>,
}

pub struct MountedModel {
    pub model_id: String,
    pub root: Entity,
    pub parts: Vec<RenderPart>,
    pub bindings: Vec<MaterialBinding>,
    pub look: Option<AppliedLook>,
}

/// Fired once a model has been spawned and is the visible model.
#[derive(Event, Debug, Clone)]
pub struct ModelMounted {
    pub model_id: String,
    pub root: Entity,
}

/// Loads, mounts and re-materials the model selected in the session.
#[derive(Resource)]
pub struct ModelAdapter {
    cache: ResourceCache<Handle<Gltf>>,
    queue: MountQueue<Handle<Gltf>>,
    failed: HashSet<String>,
    mounted: Option<MountedModel>,
    fallback_material: Handle<StandardMaterial>,
}

impl FromWorld for ModelAdapter {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let [r, g, b] = FALLBACK_MATERIAL_RGB;
        let fallback = materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        Self::new(fallback)
    }
}

impl ModelAdapter {
    pub fn new(fallback_material: Handle<StandardMaterial>) -> Self {
        Self {
            cache: ResourceCache::default(),
            queue: MountQueue::default(),
            failed: HashSet::new(),
            mounted: None,
            fallback_material,
        }
    }

    pub fn mounted(&self) -> Option<&MountedModel> {
        self.mounted.as_ref()
    }

    pub fn mounted_id(&self) -> Option<&str> {
        self.mounted.as_ref().map(|m| m.model_id.as_str())
    }

    /// Whether `model_id` at `generation` still needs a load request.
    pub fn wants_load(&self, model_id: &str, generation: u64) -> bool {
        self.mounted_id() != Some(model_id)
            && !self.queue.is_waiting_for(model_id, generation)
            && !self.has_failed(model_id)
    }

    pub fn has_failed(&self, model_id: &str) -> bool {
        self.failed.contains(model_id)
    }

    /// Queue a mount of `entry`, starting a load only if its asset path has
    /// never been requested.
    pub fn request(
        &mut self,
        entry: &ModelCatalogEntry,
        generation: u64,
        load: impl FnOnce(&str) -> Handle<Gltf>,
    ) {
        let handle = self.cache.get_or_load(entry.asset.path(), load);
        self.queue.enqueue(entry.id.clone(), generation, handle);
    }

    pub fn loads_started(&self) -> usize {
        self.cache.loads_started()
    }

    pub fn pending_mounts(&self) -> usize {
        self.queue.len()
    }

    /// Drop the mounted model, returning its root for despawning.
    pub fn unmount(&mut self) -> Option<Entity> {
        self.mounted.take().map(|m| m.root)
    }
}

/// Start a load for the session's model if it is neither mounted nor on its way.
/// Selecting a model that already failed puts the session back on the mounted one.
pub fn request_active_model(
    mut session: ResMut<ViewerSession>,
    catalog: Res<Catalog>,
    asset_server: Res<AssetServer>,
    mut adapter: ResMut<ModelAdapter>,
    mut session_changed: EventWriter<SessionChanged>,
) {
    let model_id = session.active_model_id().to_string();
    if adapter.has_failed(&model_id) {
        let Some(mounted) = adapter.mounted_id().filter(|id| *id != model_id) else {
            return;
        };
        warn!("Model '{}' failed to load earlier, keeping '{}'", model_id, mounted);
        let change = session.restore_model(&catalog, mounted);
        if !change.is_empty() {
            session_changed.write(SessionChanged { change });
        }
        return;
    }
    if !adapter.wants_load(&model_id, session.generation()) {
        return;
    }
    let Some(entry) = catalog.get(&model_id) else {
        return;
    };

    adapter.request(entry, session.generation(), |path| {
        info!("→ Loading model asset: {}", path);
        asset_server.load(path.to_string())
    });
    debug!(
        "Model loads started: {}, pending mounts: {}",
        adapter.loads_started(),
        adapter.pending_mounts()
    );
}

/// Mount loads that completed for the current selection. The previous model
/// stays visible until its replacement is ready.
pub fn resolve_model_loads(
    mut commands: Commands,
    mut adapter: ResMut<ModelAdapter>,
    mut session: ResMut<ViewerSession>,
    catalog: Res<Catalog>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut mounted_events: EventWriter<ModelMounted>,
    mut session_changed: EventWriter<SessionChanged>,
) {
    let outcomes = adapter
        .queue
        .drain_resolved(session.generation(), |handle| {
            resource_status(&asset_server, handle.id())
        });

    for outcome in outcomes {
        match outcome {
            MountOutcome::Stale(pending) => {
                debug!(
                    "Discarding stale load of '{}' (generation {})",
                    pending.model_id, pending.generation
                );
            }
            MountOutcome::Failed(pending) => {
                error!("Failed to load model '{}'", pending.model_id);
                adapter.failed.insert(pending.model_id);
                if let Some(previous) = adapter.mounted_id().map(str::to_string) {
                    let change = session.restore_model(&catalog, &previous);
                    if !change.is_empty() {
                        session_changed.write(SessionChanged { change });
                    }
                }
            }
            MountOutcome::Ready(pending) => {
                let (Some(gltf), Some(entry)) =
                    (gltfs.get(&pending.handle), catalog.get(&pending.model_id))
                else {
                    continue;
                };

                let asset = loaded_asset_from_gltf(gltf, &gltf_nodes, &gltf_meshes);
                let parts = plan_parts(&asset, &entry.asset, &adapter.fallback_material);
                if parts.is_empty() {
                    warn!("Model '{}' has no geometry to render", entry.id);
                }
                let bindings = material_bindings(&parts, &asset.materials, &adapter.fallback_material);

                if let Some(old_root) = adapter.unmount() {
                    commands.entity(old_root).despawn();
                }
                let root = spawn_model(&mut commands, entry, &parts);

                info!(
                    "✓ Mounted '{}': {} parts, {} materials ({} named)",
                    entry.id,
                    parts.len(),
                    bindings.len(),
                    asset.materials.len()
                );
                adapter.mounted = Some(MountedModel {
                    model_id: entry.id.clone(),
                    root,
                    parts,
                    bindings,
                    look: None,
                });
                mounted_events.write(ModelMounted {
                    model_id: entry.id.clone(),
                    root,
                });
            }
        }
    }
}

fn spawn_model(commands: &mut Commands, entry: &ModelCatalogEntry, parts: &[RenderPart]) -> Entity {
    commands
        .spawn((
            Name::new(format!("model:{}", entry.id)),
            MountedModelRoot,
            compose_transform(&entry.layout),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for part in parts {
                parent.spawn((
                    Name::new(part.node_name.clone()),
                    ModelPart,
                    Mesh3d(part.mesh.clone()),
                    MeshMaterial3d(part.material.clone()),
                    part.transform,
                ));
            }
        })
        .id()
}

/// What the material pass should do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LookDecision {
    /// Materials already show the requested look.
    Unchanged,
    /// Keep the current look until the new texture is decoded.
    Wait,
    /// The requested texture is unavailable; go back to this texture id.
    Restore(String),
    Apply(AppliedLook),
}

pub fn decide_look(
    current: Option<&AppliedLook>,
    texture_id: &str,
    status: &TextureStatus,
    accent: Option<Color>,
) -> LookDecision {
    let texture = match status {
        TextureStatus::Ready(handle) => Some(handle.clone()),
        _ => None,
    };
    let desired = AppliedLook {
        texture_id: texture_id.to_string(),
        texture,
        accent,
    };
    if current == Some(&desired) {
        return LookDecision::Unchanged;
    }

    match (status, current) {
        (TextureStatus::Missing, Some(previous)) if previous.texture_id != texture_id => {
            LookDecision::Restore(previous.texture_id.clone())
        }
        (TextureStatus::Pending, Some(previous)) if previous.texture.is_some() => LookDecision::Wait,
        _ => LookDecision::Apply(desired),
    }
}

/// Classify and repaint the mounted model's materials whenever the texture or
/// accent differs from what was last applied. Geometry is never reloaded.
pub fn apply_active_look(
    mut adapter: ResMut<ModelAdapter>,
    mut session: ResMut<ViewerSession>,
    catalog: Res<Catalog>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<TextureRegistry>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut session_changed: EventWriter<SessionChanged>,
) {
    let Some(mounted) = adapter.mounted.as_mut() else {
        return;
    };
    let Some(entry) = catalog.get(&mounted.model_id) else {
        return;
    };

    let texture_id = session.active_texture_id().to_string();
    textures.ensure_requested(&texture_id, &asset_server);
    let status = textures.status(&texture_id);
    let accent = resolve_accent(&entry.layout, &texture_id, textures.sampled_accent(&texture_id));

    match decide_look(mounted.look.as_ref(), &texture_id, &status, accent) {
        LookDecision::Unchanged | LookDecision::Wait => {}
        LookDecision::Restore(previous) => {
            let change = session.restore_texture(&previous);
            if !change.is_empty() {
                session_changed.write(SessionChanged { change });
            }
        }
        LookDecision::Apply(look) => {
            let context = ClassificationContext::new(&entry.layout, look.accent);
            let roles = apply_to_materials(
                &mut materials,
                &mounted.bindings,
                &context,
                look.texture.as_ref(),
            );
            debug!(
                "Material roles for '{}' ({}, accent {}): {:?}",
                mounted.model_id,
                look.texture_id,
                look.accent.map_or_else(|| "none".to_string(), colour_to_hex),
                roles
            );
            mounted.look = Some(look);
        }
    }
}
