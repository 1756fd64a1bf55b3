//! Layered configuration for the VitaHealth terminal client
//!
//! Values are resolved in order: built-in defaults, then an optional TOML file
//! (`vitahealth.toml` unless `--config` names another), then environment
//! variables prefixed with `VITAHEALTH__` using `__` as the section separator,
//! e.g. `VITAHEALTH__BACKEND__ORIGIN=http://10.0.0.5:5000`.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vitahealth_core::DEFAULT_ORIGIN;

/// File read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "vitahealth.toml";

/// Environment prefix for overrides
pub const ENV_PREFIX: &str = "VITAHEALTH";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub chatbot: ChatbotConfig,
}

// ============= Backend Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Origin of the detection/auth/planner service
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

// ============= Storage Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// JSON file holding the session and planner progress
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ============= Chatbot Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatbotConfig {
    /// Page embedded by the chatbot view
    #[serde(default = "default_chatbot_url")]
    pub url: String,
}

fn default_chatbot_url() -> String {
    vitahealth_core::DEFAULT_CHATBOT_URL.to_string()
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            url: default_chatbot_url(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClientConfig {
    /// Load configuration from defaults, file and process environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`ClientConfig::load`], reading overrides from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let (file, required) = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.to_path_buf()));
                }
                (path.to_path_buf(), true)
            }
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let settings = Config::builder()
            .set_default("backend.origin", default_origin())?
            .set_default("storage.path", default_storage_path().to_string_lossy().to_string())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("chatbot.url", default_chatbot_url())?
            .add_source(File::from(file).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let mut config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        config.normalize();
        Ok(config)
    }

    /// Reject values the client cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = self.backend.origin.trim();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "backend.origin must be an http(s) URL, got '{}'",
                self.backend.origin
            )));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path must not be empty".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.backend.origin = self.backend.origin.trim().trim_end_matches('/').to_string();
    }

    /// Override the backend origin (from `--origin`)
    pub fn with_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.backend.origin = origin.to_string();
        self.validate()?;
        self.normalize();
        Ok(self)
    }

    /// Resolved configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
