//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The `DATABASE_URL` variable is absent.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    /// The `BIND_ADDR` variable does not parse as a socket address.
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// `DATABASE_URL` is required; `BIND_ADDR` defaults to `0.0.0.0:8080`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_addr = parse_bind_addr(env::var("BIND_ADDR").ok())?;
        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

fn parse_bind_addr(raw: Option<String>) -> Result<SocketAddr, ConfigError> {
    let value = raw.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value
        .parse()
        .map_err(|source| ConfigError::InvalidBindAddr { value, source })
}
