use std::path::PathBuf;

pub use getaround_server::config::{ConfigError, HttpConfig, LogFormat};

pub const DEFAULT_PORT: u16 = 8501;

/// Analytics server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http: HttpConfig,
    /// Delay spreadsheet read once at startup.
    pub dataset_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// Listener variables as in [`HttpConfig::from_lookup`], `PORT`
    /// defaulting to `8501`, plus `DATASET_PATH`
    /// (`data/get_around_delay_analysis.xlsx`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let http = HttpConfig::from_lookup(&lookup, DEFAULT_PORT)?;
        let dataset_path = lookup("DATASET_PATH")
            .unwrap_or_else(|| "data/get_around_delay_analysis.xlsx".to_string());

        Ok(Self {
            http,
            dataset_path: PathBuf::from(dataset_path),
        })
    }
}
