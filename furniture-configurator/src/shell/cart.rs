use crate::rpc::web_rpc::WebRpcInterface;
use crate::session::events::SelectionSource;
use crate::session::state::ViewerSession;
use bevy::prelude::*;

/// Fire-and-forget request to add the current configuration to the cart.
#[derive(Event, Debug, Clone)]
pub struct AddToCart {
    pub source: SelectionSource,
}

/// Payload forwarded to the host page, which owns the actual cart.
pub fn cart_payload(session: &ViewerSession) -> serde_json::Value {
    serde_json::json!({
        "model_id": session.active_model_id(),
        "texture_id": session.active_texture_id(),
    })
}

pub fn handle_add_to_cart(
    mut events: EventReader<AddToCart>,
    session: Res<ViewerSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        info!(
            "→ Add to cart: {} / {} via {:?}",
            session.active_model_id(),
            session.active_texture_id(),
            event.source
        );
        rpc_interface.send_notification("add_to_cart", cart_payload(&session));
    }
}
