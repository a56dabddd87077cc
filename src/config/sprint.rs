//! Sprint engine configuration

use serde::Deserialize;
use std::time::Duration;

use crate::application::{SprintSettings, UnknownCommandPolicy};
use crate::domain::sprint::SprintDuration;

use super::error::ValidationError;

/// Sprint engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SprintConfig {
    /// Safety TTL on stored sessions, reset on every write
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// `ignore` or `reply`
    #[serde(default)]
    pub unknown_command: UnknownCommandPolicy,

    /// Serialize commands per group
    #[serde(default)]
    pub serialize_per_group: bool,
}

impl SprintConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn settings(&self) -> SprintSettings {
        SprintSettings {
            session_ttl: self.session_ttl(),
            unknown_command: self.unknown_command,
            serialize_per_group: self.serialize_per_group,
        }
    }

    /// Validate sprint configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let longest = SprintDuration::ALL
            .iter()
            .map(|d| u64::from(d.minutes()) * 60)
            .max()
            .unwrap_or_default();
        if self.session_ttl_secs < longest {
            return Err(ValidationError::SessionTtlTooShort(longest));
        }
        Ok(())
    }
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            unknown_command: UnknownCommandPolicy::default(),
            serialize_per_group: false,
        }
    }
}

fn default_session_ttl() -> u64 {
    3 * 60 * 60
}
