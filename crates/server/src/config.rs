use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;

/// Raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Listener, middleware and shutdown settings common to both services.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl HttpConfig {
    /// Read the shared variables through `lookup`.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `default_port`           |
    /// | `CORS_ORIGINS`         | `http://localhost:8501`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                     |
    /// | `LOG_FORMAT`           | `pretty` (or `json`)     |
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        default_port: u16,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let seconds = |name: &'static str| parse(name, var(name, "30"), "a whole number of seconds");

        let port = match lookup("PORT") {
            Some(value) => parse("PORT", value, "a valid port number")?,
            None => default_port,
        };

        let cors_origins = var("CORS_ORIGINS", "http://localhost:8501")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            cors_origins,
            request_timeout_secs: seconds("REQUEST_TIMEOUT_SECS")?,
            shutdown_timeout_secs: seconds("SHUTDOWN_TIMEOUT_SECS")?,
            log_format: parse("LOG_FORMAT", var("LOG_FORMAT", "pretty"), "'pretty' or 'json'")?,
        })
    }

    /// Socket address to bind, from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = parse("HOST", self.host.clone(), "an IP address")?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Parse a trimmed variable value, reporting the variable by name on failure.
pub fn parse<T: FromStr>(
    name: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<HttpConfig, ConfigError> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        HttpConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()), 4000)
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.cors_origins.len(), 1);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("REQUEST_TIMEOUT_SECS", " 5 "),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn invalid_port_is_reported() {
        assert_matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
    }

    #[test]
    fn invalid_timeout_is_reported() {
        assert_matches!(
            config_from(&[("SHUTDOWN_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::Invalid {
                name: "SHUTDOWN_TIMEOUT_SECS",
                ..
            })
        );
    }

    #[test]
    fn invalid_log_format_is_reported() {
        assert_matches!(
            config_from(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { name: "LOG_FORMAT", .. })
        );
    }

    #[test]
    fn unparsable_host_fails_at_bind() {
        let config = config_from(&[("HOST", "localhost:80")]).unwrap();
        assert_matches!(
            config.bind_addr(),
            Err(ConfigError::Invalid { name: "HOST", .. })
        );
    }
}
