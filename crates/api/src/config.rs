use std::path::PathBuf;

pub use getaround_server::config::{ConfigError, HttpConfig, LogFormat};

pub const DEFAULT_PORT: u16 = 3000;

/// Pricing API configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http: HttpConfig,
    /// Model artifact loaded once at startup.
    pub model_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// The listener variables are read by [`HttpConfig::from_lookup`] with
    /// `PORT` defaulting to `3000`; on top of those:
    ///
    /// | Env Var      | Default                       |
    /// |--------------|-------------------------------|
    /// | `MODEL_PATH` | `models/pricing_model.json`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            http: HttpConfig::from_lookup(&lookup, DEFAULT_PORT)?,
            model_path: PathBuf::from(
                lookup("MODEL_PATH").unwrap_or_else(|| "models/pricing_model.json".to_string()),
            ),
        })
    }
}
