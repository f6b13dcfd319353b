//! Runtime systems that report to the host page or stand in for it.

/// Notifications about mounted models sent over the RPC layer.
pub mod host_notifications;

/// Native status overlay showing the active selection and shortcuts.
///
/// Hidden and shown by the panel flag of the session.
pub mod status_overlay;
