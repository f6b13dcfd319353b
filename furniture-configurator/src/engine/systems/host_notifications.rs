use crate::engine::model::adapter::ModelMounted;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Tell the host page which model is now on screen.
pub fn model_mounted_notification_system(
    mut mounted_events: EventReader<ModelMounted>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in mounted_events.read() {
        rpc_interface.send_notification(
            "model_mounted",
            serde_json::json!({
                "id": event.model_id
            }),
        );
    }
}
