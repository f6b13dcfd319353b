use crate::engine::assets::catalog::OrbitLimits;
use crate::session::state::{ViewerSession, ViewportClass};
use bevy::input::mouse::MouseScrollUnit;
use bevy::math::EulerRot;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::render_settings::{
    DESKTOP_FOV_DEGREES, MOBILE_FOV_DEGREES, ORBIT_DAMPING, ORBIT_MAX_PITCH, ORBIT_MIN_PITCH,
};

const ROTATE_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const ZOOM_STEP: f32 = 0.95;

/// Orbit state around a focus point. The `target_*` values are where input
/// and fitting want the camera; the current values ease towards them.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target_focus: Vec3,
    pub target_distance: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub limits: OrbitLimits,
}

impl OrbitCamera {
    /// Orbit that reproduces a camera placed at `position` looking at `focus`.
    pub fn from_position(position: Vec3, focus: Vec3, limits: OrbitLimits) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(f32::EPSILON);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (-(offset.y / distance).asin()).clamp(ORBIT_MIN_PITCH, ORBIT_MAX_PITCH);

        Self {
            focus_point: focus,
            distance,
            yaw,
            pitch,
            target_focus: focus,
            target_distance: distance,
            target_yaw: yaw,
            target_pitch: pitch,
            limits,
        }
    }

    /// Move the orbit onto a newly fitted model.
    pub fn retarget(&mut self, focus: Vec3, distance: f32, limits: OrbitLimits) {
        self.limits = limits;
        self.target_focus = focus;
        self.target_distance = distance.clamp(limits.min_distance, limits.max_distance);
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * ROTATE_SENSITIVITY;
        self.target_pitch =
            (self.target_pitch - delta.y * ROTATE_SENSITIVITY).clamp(ORBIT_MIN_PITCH, ORBIT_MAX_PITCH);
    }

    /// Slide the focus in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.target_yaw, self.target_pitch, 0.0);
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let scale = self.target_distance * PAN_SENSITIVITY;
        self.target_focus += (-right * delta.x + up * delta.y) * scale;
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.target_distance = (self.target_distance * ZOOM_STEP.powf(scroll))
            .clamp(self.limits.min_distance, self.limits.max_distance);
    }

    /// Ease current values towards their targets. `ORBIT_DAMPING` is the
    /// fraction covered per frame at 60 fps.
    pub fn step(&mut self, delta_secs: f32) {
        let t = 1.0 - (1.0 - ORBIT_DAMPING).powf(delta_secs * 60.0);
        self.focus_point = self.focus_point.lerp(self.target_focus, t);
        self.distance += (self.target_distance - self.distance) * t;
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
    }

    pub fn transform(&self) -> Transform {
        orbit_transform(self.focus_point, self.yaw, self.pitch, self.distance)
    }
}

/// Camera transform on the orbit sphere, looking at `focus`.
pub fn orbit_transform(focus: Vec3, yaw: f32, pitch: f32, distance: f32) -> Transform {
    let rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    Transform {
        translation: focus + rotation * Vec3::Z * distance,
        rotation,
        ..default()
    }
}

pub fn fov_for(class: ViewportClass) -> f32 {
    match class {
        ViewportClass::Mobile => MOBILE_FOV_DEGREES,
        ViewportClass::Desktop => DESKTOP_FOV_DEGREES,
    }
    .to_radians()
}

/// Left drag rotates, right drag pans, wheel zooms.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(mouse_delta);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    orbit.step(time.delta_secs());
    *camera_transform = orbit.transform();
}

/// Keep the perspective field of view in line with the layout class.
pub fn update_camera_fov(
    session: Res<ViewerSession>,
    mut projections: Query<&mut Projection, With<Camera3d>>,
) {
    if !session.is_changed() {
        return;
    }
    let fov = fov_for(session.viewport_class());
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            if (perspective.fov - fov).abs() > f32::EPSILON {
                perspective.fov = fov;
            }
        }
    }
}
