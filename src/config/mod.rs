//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SLIDE_STUDY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use slide_study::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod database;
mod error;
mod generation;
mod pdf;
mod server;
mod speech;
mod storage;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use generation::GenerationConfig;
pub use pdf::PdfConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use speech::{SpeechConfig, SpeechProvider};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Object storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// PDF rasterization configuration
    #[serde(default)]
    pub pdf: PdfConfig,

    /// Generation workflow tunables
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SLIDE_STUDY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SLIDE_STUDY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SLIDE_STUDY__STORAGE__BUCKET=...` -> `storage.bucket = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SLIDE_STUDY")
                    .prefix_separator("__")
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
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.speech.validate()?;
        self.storage.validate()?;
        self.pdf.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "SLIDE_STUDY__AI__OPENAI_API_KEY",
        "SLIDE_STUDY__STORAGE__BUCKET",
        "SLIDE_STUDY__SERVER__PORT",
        "SLIDE_STUDY__SERVER__LOG_FORMAT",
        "SLIDE_STUDY__GENERATION__QUIZ_CHUNK_SIZE",
        "SLIDE_STUDY__SPEECH__PROVIDER",
    ];

    fn set_minimal_env() {
        env::set_var("SLIDE_STUDY__AI__OPENAI_API_KEY", "sk-test");
        env::set_var("SLIDE_STUDY__STORAGE__BUCKET", "lectures");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.bucket.as_deref(), Some("lectures"));
        assert!(config.database.url().is_none());
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SLIDE_STUDY__SERVER__PORT", "3000");
        env::set_var("SLIDE_STUDY__SERVER__LOG_FORMAT", "json");
        env::set_var("SLIDE_STUDY__GENERATION__QUIZ_CHUNK_SIZE", "8");
        env::set_var("SLIDE_STUDY__SPEECH__PROVIDER", "deepgram");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.generation.quiz_chunk_size, 8);
        assert_eq!(config.speech.provider, SpeechProvider::Deepgram);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_ai_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();
        assert!(config.validate().is_err());
    }
}
