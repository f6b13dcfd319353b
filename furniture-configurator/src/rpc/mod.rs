//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! Implements bidirectional messaging between the Bevy viewer and the host page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Calling From the Host Page
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "select_texture",
//!   params: { id: "texture_4" },
//!   id: 7
//! }), "*");
//! ```
//!
//! Requests without an `id` are executed but never answered. Selection
//! methods validate ids against the catalog and texture library before
//! dispatching a session event; the session itself changes on the next
//! frame and is announced through `session_changed`.
//!
//! Bevy systems push updates with `WebRpcInterface::send_notification()`.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### Catalog and Session
//! - `get_catalog`: List models (id, display name, thumbnail, AR files) and the texture library
//! - `get_session`: Current model, texture, panel state, layout class and generation
//!
//! ### Selection
//! - `select_model`: Switch to the catalog model `{ "id": ... }`
//! - `select_texture`: Switch to the library texture `{ "id": ... }`
//! - `toggle_panel`: Show or hide the configuration panel
//!
//! ### Commerce
//! - `view_in_ar`: Hand the active model to the platform AR viewer
//! - `add_to_cart`: Forward the active configuration to the host cart
//!
//! ## Notifications
//! - `session_changed`: Full session snapshot after any transition
//! - `model_mounted`: A newly selected model is on screen
//! - `texture_missing`: A library texture failed to decode
//! - `loading_progress`: Catalog and texture loading state
//! - `ar_handoff`: AR link built (or unavailable) for the active model
//! - `add_to_cart`: Active model and texture ids

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
