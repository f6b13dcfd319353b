use crate::engine::assets::catalog::{Catalog, LayoutHints};
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::model::adapter::{ModelAdapter, ModelMounted};
use crate::engine::model::render_plan::RenderPart;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::primitives::Aabb;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION, KEY_LIGHT_ILLUMINANCE,
    KEY_LIGHT_POSITION,
};

/// Root transform for a model: lifted by the vertical offset, uniformly scaled.
pub fn compose_transform(layout: &LayoutHints) -> Transform {
    Transform::from_xyz(0.0, layout.vertical_offset, 0.0)
        .with_scale(Vec3::splat(layout.uniform_scale))
}

/// World-space axis-aligned bounds of a mounted model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}

fn aabb_corners(aabb: &Aabb) -> [Vec3; 8] {
    let min = Vec3::from(aabb.min());
    let max = Vec3::from(aabb.max());
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ]
}

/// Bounds of mesh AABBs placed by their part transform under `root`.
pub fn model_bounds(
    parts: impl IntoIterator<Item = (Aabb, Transform)>,
    root: Transform,
) -> Option<ModelBounds> {
    let root = root.compute_affine();
    ModelBounds::from_points(parts.into_iter().flat_map(|(aabb, part)| {
        let world = root * part.compute_affine();
        aabb_corners(&aabb).map(|corner| world.transform_point3(corner))
    }))
}

/// World bounds of the loaded meshes of `parts`. Parts whose mesh is not
/// loaded, or has no positions, are skipped.
pub fn mounted_bounds(
    meshes: &Assets<Mesh>,
    parts: &[RenderPart],
    root: Transform,
) -> Option<ModelBounds> {
    let aabbs = parts.iter().filter_map(|part| {
        let aabb = meshes.get(&part.mesh)?.compute_aabb()?;
        Some((aabb, part.transform))
    });
    model_bounds(aabbs, root)
}

/// Camera distance that frames an object of `max_extent` for a vertical
/// field of view `fov_y` (radians) and viewport `aspect` (width / height).
pub fn fit_distance(max_extent: f32, fov_y: f32, aspect: f32, margin: f32) -> f32 {
    let h = max_extent / (2.0 * (fov_y * 0.5).tan());
    let aspect = if aspect > f32::EPSILON { aspect } else { 1.0 };
    margin * h.max(h / aspect)
}

/// Refit the orbit camera whenever a different model has been mounted.
pub fn fit_camera_to_mounted_model(
    mut mounted_events: EventReader<ModelMounted>,
    adapter: Res<ModelAdapter>,
    catalog: Res<Catalog>,
    meshes: Res<Assets<Mesh>>,
    projections: Query<&Projection, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Some(event) = mounted_events.read().last() else {
        return;
    };
    let (Some(mounted), Some(entry)) = (adapter.mounted(), catalog.get(&event.model_id)) else {
        return;
    };
    if mounted.model_id != event.model_id {
        return;
    }

    let Some(bounds) = mounted_bounds(&meshes, &mounted.parts, compose_transform(&entry.layout))
    else {
        warn!("No mesh bounds for '{}', keeping camera", entry.id);
        return;
    };

    let (fov, aspect) = match projections.single() {
        Ok(Projection::Perspective(perspective)) => (perspective.fov, perspective.aspect_ratio),
        _ => return,
    };

    let distance = fit_distance(
        bounds.max_extent(),
        fov,
        aspect,
        entry.layout.camera_fit_margin,
    );
    orbit.retarget(bounds.center(), distance, entry.layout.orbit);
    info!(
        "✓ Camera fitted to '{}': extent {:.2}, distance {:.2}",
        entry.id,
        bounds.max_extent(),
        orbit.target_distance
    );
}

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        Name::new("key_light"),
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from(KEY_LIGHT_POSITION)).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("fill_light"),
        PointLight {
            intensity: FILL_LIGHT_INTENSITY,
            range: 40.0,
            ..default()
        },
        Transform::from_translation(Vec3::from(FILL_LIGHT_POSITION)),
    ));
}
