//! Service configuration read from the environment at startup.
//!
//! # Environment Variables
//!
//! - `PORT`: listen port (default: 3000; unparsable values fall back to the default)
//! - `MAPBOX_ACCESS_TOKEN`: provider access token (required)
//! - `MAPBOX_BASE_URL`: provider base URL (default: `https://api.mapbox.com`)
//! - `PROVIDER_TIMEOUT_SECS`: outbound request timeout in seconds (default: 30)

use std::net::SocketAddr;
use std::time::Duration;

use postdist_lib::mapbox::{MapboxConfig, DEFAULT_BASE_URL};
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default outbound request timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set to a non-empty value")]
    Missing(&'static str),
}

/// Process-wide configuration; read-only after startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port to listen on, on all interfaces.
    pub port: u16,
    /// Outbound provider settings.
    pub provider: MapboxConfig,
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .filter(|p: &u16| *p != 0)
            .unwrap_or(DEFAULT_PORT);

        let access_token = lookup("MAPBOX_ACCESS_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("MAPBOX_ACCESS_TOKEN"))?;

        let base_url = lookup("MAPBOX_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = lookup("PROVIDER_TIMEOUT_SECS")
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS);

        let provider = MapboxConfig::new(access_token)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(timeout_secs));

        Ok(Self { port, provider })
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
