use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Error raised when an environment variable is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound on pooled connections (default: `10`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Insert sample folders and a welcome note into an empty store at startup.
    pub seed_sample_data: bool,
    /// Log line format (default: text).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `8000`                                        |
    /// | `DATABASE_URL`         | required                                      |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                          |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `SEED_SAMPLE_DATA`     | `false`                                       |
    /// | `LOG_FORMAT`           | `text`                                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8000u16)?;

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing {
                name: "DATABASE_URL",
            })?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let seed_sample_data = parse_or(&lookup, "SEED_SAMPLE_DATA", false)?;
        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            cors_origins,
            request_timeout_secs,
            seed_sample_data,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/mynotes")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.seed_sample_data);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn missing_database_url_is_reported() {
        assert_matches!(
            load(&[]),
            Err(ConfigError::Missing { name: "DATABASE_URL" })
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/notes"),
            ("PORT", "9001"),
            ("CORS_ORIGINS", "https://notes.example.com, ,https://app.example.com"),
            ("SEED_SAMPLE_DATA", "true"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("https://notes.example.com"),
                HeaderValue::from_static("https://app.example.com"),
            ]
        );
        assert!(config.seed_sample_data);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = load(&[("DATABASE_URL", "postgres://db/notes"), ("PORT", "http")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
    }
}
