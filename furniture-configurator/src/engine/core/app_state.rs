use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Per-frame ordering of the viewer's runtime systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    /// Keyboard shortcuts and window layout tracking.
    Input,
    /// Selection requests applied to the session.
    Session,
    /// Model loads started and completed mounts spawned.
    Mount,
    /// Material rules applied to the mounted model.
    Materials,
    /// Camera fit, orbit input and host notifications.
    Camera,
}

pub fn catalog_ready(loading_progress: Res<LoadingProgress>) -> bool {
    loading_progress.catalog_loaded
}

// Final transition to running state
pub fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("→ Catalog ready, transitioning to Running state");
    next_state.set(AppState::Running);
}
