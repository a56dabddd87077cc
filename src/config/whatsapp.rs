//! WhatsApp Cloud API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::whatsapp::{CloudApiConfig, DEFAULT_API_BASE_URL};

use super::error::ValidationError;

/// WhatsApp Cloud API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Graph API root, including version
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token for outbound messages
    pub access_token: SecretString,

    /// Sending phone number id
    pub phone_number_id: String,

    /// Token Meta echoes during the subscription handshake
    pub verify_token: SecretString,

    /// App secret for `X-Hub-Signature-256`; unsigned posts are accepted when unset
    #[serde(default)]
    pub app_secret: Option<SecretString>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl WhatsAppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for `CloudApiSender`.
    pub fn cloud_api(&self) -> CloudApiConfig {
        CloudApiConfig::new(
            self.phone_number_id.clone(),
            self.access_token.expose_secret().clone(),
        )
        .with_base_url(self.api_base_url.clone())
        .with_timeout(self.request_timeout())
    }

    /// Validate WhatsApp configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.access_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("WHATSAPP_ACCESS_TOKEN"));
        }
        if self.phone_number_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WHATSAPP_PHONE_NUMBER_ID"));
        }
        if self.verify_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("WHATSAPP_VERIFY_TOKEN"));
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}
