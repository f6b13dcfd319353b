//! Orbit camera around the mounted model.
//!
//! Mouse driven rotation, panning and zoom with damped motion, distance
//! limits from the active catalog entry and a layout dependent field of view.

/// Orbit state, input controller and field of view updates.
///
/// The camera is refitted by scene composition when the model changes.
pub mod orbit_camera;
