//! Inbound webhook server.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::dialogue::controller::DialogueController;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub controller: Arc<DialogueController>,
}

/// GET / — liveness probe.
async fn health() -> &'static str {
    "OK"
}

/// POST / — Telegram update webhook.
///
/// The update envelope is parsed leniently: anything without a chat id and
/// message text is acknowledged and ignored. Always replies 200 so
/// Telegram does not redeliver.
async fn webhook(State(state): State<WebhookState>, body: String) -> &'static str {
    let update: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let message = update.get("message");
    let chat_id = message
        .and_then(|m| m.get("chat"))
        .and_then(|c| c.get("id"))
        .and_then(serde_json::Value::as_i64);
    let text = message
        .and_then(|m| m.get("text"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or("");

    state.controller.handle_update(chat_id, text).await;
    "ok"
}

/// Build the webhook router.
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(health).post(webhook))
        .with_state(state)
}
