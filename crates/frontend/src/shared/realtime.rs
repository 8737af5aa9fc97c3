//! Cross-tab notification bridge (fire-and-forget).
//!
//! The realtime channel itself is an opaque service; the frontend only posts
//! an event name + payload and never waits for delivery.

use crate::shared::api;

pub fn notify(event: &str, payload: serde_json::Value) {
    let url = api::api_url("/api/notify");
    let body = serde_json::json!({ "event": event, "payload": payload });
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = api::post_json_unit(&url, &body).await {
            // Best effort only; a lost notification must not disturb the UI.
            log::warn!("notify failed: {}", e);
        }
    });
}
