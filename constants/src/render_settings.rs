/// Windows at or below this logical width use the mobile layout.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Vertical field of view for the desktop layout, in degrees.
pub const DESKTOP_FOV_DEGREES: f32 = 25.0;

/// Vertical field of view for the mobile layout, in degrees.
pub const MOBILE_FOV_DEGREES: f32 = 32.0;

/// Initial camera position before the first model fit.
pub const INITIAL_CAMERA_POSITION: [f32; 3] = [4.0, 3.0, 5.0];

/// Orbit target height used until a model has been fitted.
pub const INITIAL_ORBIT_TARGET_Y: f32 = -0.15;

pub const DEFAULT_FIT_MARGIN: f32 = 1.5;
pub const DEFAULT_ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const DEFAULT_ORBIT_MAX_DISTANCE: f32 = 8.0;

/// Orbit damping factor per frame at 60 fps.
pub const ORBIT_DAMPING: f32 = 0.05;

/// Keeps the camera just above the horizon (polar angle limited to 90 degrees).
pub const ORBIT_MIN_PITCH: f32 = -std::f32::consts::FRAC_PI_2 + 0.01;
pub const ORBIT_MAX_PITCH: f32 = 0.0;

pub const AMBIENT_BRIGHTNESS: f32 = 600.0;
pub const KEY_LIGHT_ILLUMINANCE: f32 = 8_000.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [2.0, 10.0, 0.0];
pub const FILL_LIGHT_POSITION: [f32; 3] = [0.0, 10.0, 0.0];
pub const FILL_LIGHT_INTENSITY: f32 = 200_000.0;
