use crate::engine::assets::catalog::Catalog;
use crate::engine::assets::texture_registry::TextureDescriptor;
use crate::session::events::{SelectModel, SelectTexture, SelectionSource, TogglePanel};
use crate::session::state::ViewerSession;
use crate::shell::ar::ViewInAr;
use crate::shell::cart::AddToCart;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::texture::TEXTURE_LIBRARY;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and Bevy. Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Shared between the JS callback and the ECS.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership passes to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Everything RPC methods read or dispatch to.
#[derive(SystemParam)]
pub struct RpcContext<'w> {
    catalog: Option<Res<'w, Catalog>>,
    session: Option<Res<'w, ViewerSession>>,
    models: EventWriter<'w, SelectModel>,
    textures: EventWriter<'w, SelectTexture>,
    panel: EventWriter<'w, TogglePanel>,
    ar: EventWriter<'w, ViewInAr>,
    cart: EventWriter<'w, AddToCart>,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
            }
        }
    }
}

/// Run one request. Notifications (no id) are executed without a response.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_catalog" => handle_get_catalog(context),
        "get_session" => handle_get_session(context),
        "select_model" => handle_select_model(&request.params, context),
        "select_texture" => handle_select_texture(&request.params, context),
        "toggle_panel" => {
            context.panel.write(TogglePanel {
                source: SelectionSource::Rpc,
            });
            Ok(serde_json::json!({ "success": true }))
        }
        "view_in_ar" => {
            context.ar.write(ViewInAr {
                source: SelectionSource::Rpc,
            });
            Ok(serde_json::json!({ "success": true }))
        }
        "add_to_cart" => {
            context.cart.write(AddToCart {
                source: SelectionSource::Rpc,
            });
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    // Only requests with IDs get responses.
    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

#[derive(Deserialize)]
struct IdParams {
    id: String,
}

fn parse_id_params(params: &serde_json::Value) -> Result<String, RpcError> {
    serde_json::from_value::<IdParams>(params.clone())
        .map(|p| p.id)
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))
}

/// Catalog entries and the texture library as shown by the host page.
pub fn catalog_payload(catalog: &Catalog) -> serde_json::Value {
    let models: Vec<_> = catalog
        .entries()
        .iter()
        .map(|entry| {
            serde_json::json!({
                "id": entry.id,
                "display_name": entry.display_name,
                "thumbnail_path": entry.thumbnail_path,
                "ar": entry.ar_assets(),
            })
        })
        .collect();
    let textures: Vec<_> = TEXTURE_LIBRARY
        .iter()
        .map(|texture| {
            serde_json::json!({
                "id": texture.id,
                "path": texture.path,
                "swatch": texture.swatch,
            })
        })
        .collect();

    serde_json::json!({
        "models": models,
        "textures": textures,
    })
}

fn handle_get_catalog(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let catalog = context
        .catalog
        .as_deref()
        .ok_or_else(|| RpcError::internal_error("Catalog not loaded yet"))?;
    Ok(catalog_payload(catalog))
}

fn handle_get_session(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let session = context
        .session
        .as_deref()
        .ok_or_else(|| RpcError::internal_error("Session not started yet"))?;
    serde_json::to_value(session).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Validate the model id and dispatch a selection event.
fn handle_select_model(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let id = parse_id_params(params)?;
    let known = context
        .catalog
        .as_deref()
        .is_some_and(|catalog| catalog.contains(&id));
    if !known {
        return Err(RpcError::invalid_params(&format!("Unknown model: {}", id)));
    }

    context.models.write(SelectModel {
        id: id.clone(),
        source: SelectionSource::Rpc,
    });
    info!("Model selection event dispatched: {}", id);

    Ok(serde_json::json!({
        "success": true,
        "model_id": id
    }))
}

/// Validate the texture id and dispatch a selection event.
fn handle_select_texture(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let id = parse_id_params(params)?;
    if TextureDescriptor::lookup(&id).is_none() {
        return Err(RpcError::invalid_params(&format!("Unknown texture: {}", id)));
    }

    context.textures.write(SelectTexture {
        id: id.clone(),
        source: SelectionSource::Rpc,
    });
    info!("Texture selection event dispatched: {}", id);

    Ok(serde_json::json!({
        "success": true,
        "texture_id": id
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
