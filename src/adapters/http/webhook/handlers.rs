//! HTTP handlers for the WhatsApp webhook.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::whatsapp::{
    verify_signature, SignatureError, WebhookNotification, SIGNATURE_HEADER,
};
use crate::application::ChatDispatcher;

use super::dto::{ErrorResponse, VerifyQuery};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookAppState {
    pub dispatcher: Arc<ChatDispatcher>,
    pub verify_token: SecretString,
    /// When set, every POST must carry a valid `X-Hub-Signature-256`.
    pub app_secret: Option<SecretString>,
}

impl WebhookAppState {
    pub fn new(dispatcher: Arc<ChatDispatcher>, verify_token: SecretString) -> Self {
        Self {
            dispatcher,
            verify_token,
            app_secret: None,
        }
    }

    pub fn with_app_secret(mut self, app_secret: SecretString) -> Self {
        self.app_secret = Some(app_secret);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

pub const HEALTH_TEXT: &str = "WhatsApp Sprint Bot is running!";

/// `GET /`
pub async fn health() -> &'static str {
    HEALTH_TEXT
}

/// `GET /webhook` - Meta subscription handshake.
pub async fn verify_subscription(
    State(state): State<WebhookAppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    let token_matches = query.verify_token.as_deref().is_some_and(|token| {
        token
            .as_bytes()
            .ct_eq(state.verify_token.expose_secret().as_bytes())
            .into()
    });

    match (query.mode.as_deref(), token_matches) {
        (Some("subscribe"), true) => {
            tracing::info!("Webhook subscription verified");
            (StatusCode::OK, query.challenge.unwrap_or_default()).into_response()
        }
        _ => {
            tracing::warn!(mode = ?query.mode, "Webhook verification refused");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// `POST /webhook` - message notifications.
pub async fn receive_notification(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    if let Some(secret) = &state.app_secret {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        verify_signature(secret.expose_secret().as_bytes(), &body, header)?;
    }

    let notification: WebhookNotification = serde_json::from_slice(&body)
        .map_err(|e| WebhookApiError::MalformedPayload(e.to_string()))?;

    let messages = notification.inbound_messages();
    tracing::debug!(count = messages.len(), "Webhook notification received");

    for message in &messages {
        state.dispatcher.dispatch(message).await;
    }

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Rejections for webhook requests.
#[derive(Debug)]
pub enum WebhookApiError {
    Signature(SignatureError),
    MalformedPayload(String),
}

impl From<SignatureError> for WebhookApiError {
    fn from(err: SignatureError) -> Self {
        Self::Signature(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            WebhookApiError::Signature(err) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("INVALID_SIGNATURE", err.to_string()),
            ),
            WebhookApiError::MalformedPayload(reason) => {
                tracing::warn!(reason = %reason, "Malformed webhook payload");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("MALFORMED_PAYLOAD", reason),
                )
            }
        };
        (status, Json(error)).into_response()
    }
}
