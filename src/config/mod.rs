//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WORDSPRINT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use wordsprint::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod redis;
mod server;
mod sprint;
mod whatsapp;

pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{LogFormat, ServerConfig};
pub use sprint::SprintConfig;
pub use whatsapp::WhatsAppConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, log format, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration (session store)
    pub redis: RedisConfig,

    /// WhatsApp Cloud API configuration
    pub whatsapp: WhatsAppConfig,

    /// Sprint engine behaviour
    #[serde(default)]
    pub sprint: SprintConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WORDSPRINT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WORDSPRINT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WORDSPRINT__REDIS__URL=...` -> `redis.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WORDSPRINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.redis.validate()?;
        self.whatsapp.validate()?;
        self.sprint.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::UnknownCommandPolicy;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const REQUIRED: [(&str, &str); 4] = [
        ("WORDSPRINT__REDIS__URL", "redis://localhost:6379"),
        ("WORDSPRINT__WHATSAPP__ACCESS_TOKEN", "EAAG-token"),
        ("WORDSPRINT__WHATSAPP__PHONE_NUMBER_ID", "1234567890"),
        ("WORDSPRINT__WHATSAPP__VERIFY_TOKEN", "verify-me"),
    ];

    const OPTIONAL: [&str; 5] = [
        "WORDSPRINT__SERVER__PORT",
        "WORDSPRINT__SERVER__LOG_FORMAT",
        "WORDSPRINT__WHATSAPP__APP_SECRET",
        "WORDSPRINT__SPRINT__UNKNOWN_COMMAND",
        "WORDSPRINT__SPRINT__SERIALIZE_PER_GROUP",
    ];

    fn set_minimal_env() {
        for (key, value) in REQUIRED {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in REQUIRED {
            env::remove_var(key);
        }
        for key in OPTIONAL {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.whatsapp.phone_number_id, "1234567890");
        assert_eq!(config.whatsapp.verify_token.expose_secret(), "verify-me");
        assert!(config.whatsapp.app_secret.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.redis.connect_timeout_secs, 5);
        assert_eq!(config.sprint.session_ttl_secs, 10_800);
        assert_eq!(config.sprint.unknown_command, UnknownCommandPolicy::Ignore);
    }

    #[test]
    fn test_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WORDSPRINT__SERVER__PORT", "8081");
        env::set_var("WORDSPRINT__SERVER__LOG_FORMAT", "json");
        env::set_var("WORDSPRINT__WHATSAPP__APP_SECRET", "app-secret");
        env::set_var("WORDSPRINT__SPRINT__UNKNOWN_COMMAND", "reply");
        env::set_var("WORDSPRINT__SPRINT__SERIALIZE_PER_GROUP", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert!(config.whatsapp.app_secret.is_some());
        assert_eq!(config.sprint.unknown_command, UnknownCommandPolicy::Reply);
        assert!(config.sprint.serialize_per_group);
    }

    #[test]
    fn test_missing_whatsapp_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("WORDSPRINT__REDIS__URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
