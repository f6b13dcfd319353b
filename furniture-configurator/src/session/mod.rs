//! Viewer selection state and the requests that change it.
//!
//! The session holds the active model, texture, panel visibility and layout
//! class. It only changes through named transitions, driven by events from
//! the host page RPC layer, keyboard shortcuts or load recovery.

/// Selection request events and the systems applying them.
pub mod events;

/// Native keyboard shortcuts for selection, AR and cart.
pub mod shortcuts;

/// Session resource, layout class and transitions.
pub mod state;
