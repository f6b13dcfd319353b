//! Scene composition around the mounted model.
//!
//! Places the model root from its layout hints, frames the orbit camera on
//! model changes and sets up the fixed studio lighting.

/// Root transform, world bounds, camera fit and lighting.
///
/// Fitting runs only when a new model is mounted; texture swaps keep the view.
pub mod composition;
