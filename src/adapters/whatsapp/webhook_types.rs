//! WhatsApp Cloud API webhook types.
//!
//! These types mirror the notification envelope Meta posts to the webhook:
//! `entry[].changes[].value.messages[]`. Only the fields the bot reads are
//! modelled; everything else is ignored by serde.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::application::InboundMessage;
use crate::domain::foundation::{GroupId, ParticipantId};

type HmacSha256 = Hmac<Sha256>;

/// Header Meta uses for the payload signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

// ════════════════════════════════════════════════════════════════════════════════
// Signature Verification
// ════════════════════════════════════════════════════════════════════════════════

/// Error verifying the `X-Hub-Signature-256` header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Missing X-Hub-Signature-256 header")]
    MissingHeader,

    #[error("Signature header must look like sha256=<hex>")]
    InvalidFormat,

    #[error("Signature does not match payload")]
    Mismatch,
}

/// Verify a payload against its `sha256=<hex>` signature header.
///
/// Uses constant-time comparison.
pub fn verify_signature(
    app_secret: &[u8],
    payload: &[u8],
    header: Option<&str>,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::MissingHeader)?;
    let provided = header
        .trim()
        .strip_prefix("sha256=")
        .and_then(hex_decode)
        .ok_or(SignatureError::InvalidFormat)?;

    let mut mac = HmacSha256::new_from_slice(app_secret).map_err(|_| SignatureError::Mismatch)?;
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    if expected.as_slice().ct_eq(&provided).unwrap_u8() != 1 {
        tracing::warn!("Invalid webhook signature");
        return Err(SignatureError::Mismatch);
    }
    Ok(())
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        bytes.push(byte);
    }
    Some(bytes)
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Compute the header value Meta would send for `payload`.
pub fn sign_payload(app_secret: &[u8], payload: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret).ok()?;
    mac.update(payload);
    Some(format!("sha256={}", hex_encode(&mac.finalize().into_bytes())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Notification Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Top-level webhook notification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookNotification {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    /// Sender's WhatsApp id.
    pub from: String,
    /// Group chat the message was posted in, when present.
    #[serde(default)]
    pub chat: Option<ChatRef>,
    #[serde(default)]
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

impl WebhookMessage {
    /// Convert to an engine event. Non-text messages and messages with
    /// blank identities yield `None`.
    pub fn to_inbound(&self) -> Option<InboundMessage> {
        let text = self.text.as_ref()?;
        let group_raw = self.chat.as_ref().map_or(self.from.as_str(), |c| c.id.as_str());

        let group_id = GroupId::new(group_raw).ok()?;
        let sender_id = ParticipantId::new(self.from.as_str()).ok()?;
        Some(InboundMessage::new(group_id, sender_id, text.body.clone()))
    }
}

impl WebhookNotification {
    /// Every text message carried by the notification, in delivery order.
    pub fn inbound_messages(&self) -> Vec<InboundMessage> {
        if self.object.is_none() {
            return Vec::new();
        }
        self.entry
            .iter()
            .flat_map(|entry| entry.changes.iter())
            .flat_map(|change| change.value.messages.iter())
            .filter_map(WebhookMessage::to_inbound)
            .collect()
    }
}
