//! Host-facing affordances of the viewer: AR handoff and cart requests.

/// Platform AR viewer deep links and browser navigation.
pub mod ar;

/// Add-to-cart requests forwarded to the host page.
pub mod cart;
