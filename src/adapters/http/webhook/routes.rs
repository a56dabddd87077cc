//! Route definitions for the webhook surface.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{health, receive_notification, verify_subscription, WebhookAppState};

/// Build the full router.
///
/// ## Endpoints
/// - `GET /` - health text
/// - `GET /webhook` - subscription handshake
/// - `POST /webhook` - message notifications
pub fn webhook_router(state: WebhookAppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/webhook",
            get(verify_subscription).post(receive_notification),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
