//! WhatsApp Cloud API adapters.
//!
//! - `CloudApiSender` - outbound `MessageSender` over the Graph API
//! - `RecordingSender` - in-memory `MessageSender` for tests
//! - `webhook_types` - inbound notification envelope and signature checks

mod cloud_api_sender;
mod mock_sender;
pub mod webhook_types;

pub use cloud_api_sender::{CloudApiConfig, CloudApiSender, DEFAULT_API_BASE_URL};
pub use mock_sender::{RecordingSender, SentMessage};
pub use webhook_types::{verify_signature, SignatureError, WebhookNotification, SIGNATURE_HEADER};
