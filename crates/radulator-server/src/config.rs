use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid RADULATOR_BIND address {value:?}: {source}")]
    Bind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid RADULATOR_LOG_FORMAT {0:?} (expected \"pretty\" or \"json\")")]
    LogFormat(String),

    #[error("invalid RADULATOR_CORS_ORIGIN {0:?}")]
    CorsOrigin(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub log_format: LogFormat,
    /// `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("RADULATOR_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::Bind {
                value: bind_raw.clone(),
                source,
            })?;

        let log_format = match get("RADULATOR_LOG_FORMAT") {
            None => LogFormat::Pretty,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::LogFormat(v)),
            },
        };

        let cors_origin = match get("RADULATOR_CORS_ORIGIN") {
            None => None,
            Some(v) if v.trim() == "*" => None,
            Some(v) => Some(
                HeaderValue::from_str(v.trim()).map_err(|_| ConfigError::CorsOrigin(v.clone()))?,
            ),
        };

        Ok(Self {
            bind,
            log_format,
            cors_origin,
        })
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match &self.cors_origin {
            Some(origin) => cors.allow_origin(origin.clone()),
            None => cors.allow_origin(Any),
        }
    }
}
