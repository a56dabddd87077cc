//! HTTP adapter for the WhatsApp webhook.
//!
//! - `GET /` - health text
//! - `GET /webhook` - Meta subscription handshake
//! - `POST /webhook` - message notifications

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{WebhookApiError, WebhookAppState};
pub use routes::webhook_router;
