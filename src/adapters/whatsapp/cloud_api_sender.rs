//! WhatsApp Cloud API message sender.
//!
//! Implements `MessageSender` by posting text messages to
//! `{api_base_url}/{phone_number_id}/messages`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CloudApiConfig::new(phone_number_id, access_token);
//! let sender = CloudApiSender::new(config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::GroupId;
use crate::ports::{MessageSendError, MessageSender};

/// Default Graph API root.
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com/v17.0";

/// Cloud API connection settings.
#[derive(Clone)]
pub struct CloudApiConfig {
    /// Graph API root, without trailing slash.
    api_base_url: String,

    /// Business phone number the bot sends from.
    phone_number_id: String,

    /// Long-lived system user token.
    access_token: SecretString,

    /// Per-request timeout.
    timeout: Duration,
}

impl CloudApiConfig {
    pub fn new(phone_number_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            phone_number_id: phone_number_id.into(),
            access_token: SecretString::new(access_token.into()),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint messages are posted to.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base_url, self.phone_number_id)
    }
}

impl std::fmt::Debug for CloudApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudApiConfig")
            .field("api_base_url", &self.api_base_url)
            .field("phone_number_id", &self.phone_number_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextPayload<'a>,
}

#[derive(Debug, Serialize)]
struct TextPayload<'a> {
    body: &'a str,
}

impl<'a> SendTextRequest<'a> {
    fn new(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: TextPayload { body },
        }
    }
}

/// Sends replies through the WhatsApp Cloud API.
#[derive(Debug)]
pub struct CloudApiSender {
    config: CloudApiConfig,
    http_client: reqwest::Client,
}

impl CloudApiSender {
    /// Create a sender with its own HTTP client.
    pub fn new(config: CloudApiConfig) -> Result<Self, MessageSendError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MessageSendError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl MessageSender for CloudApiSender {
    async fn send_text(&self, group_id: &GroupId, text: &str) -> Result<(), MessageSendError> {
        let request = SendTextRequest::new(group_id.as_str(), text);

        let response = self
            .http_client
            .post(self.config.messages_url())
            .bearer_auth(self.config.access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| MessageSendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessageSendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(group_id = %group_id, "Delivered WhatsApp message");
        Ok(())
    }
}
