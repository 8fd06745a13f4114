use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Server configuration for the HTTP API
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Major API version, mounted as `/api/v{version}`
    pub api_version: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            api_version: 1,
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path prefix every API route is nested under, e.g. `/api/v1`.
    pub fn api_prefix(&self) -> String {
        format!("/api/v{}", self.api_version)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - APP_HOST: defaults to 0.0.0.0 (all interfaces)
    /// - APP_PORT: defaults to 8080
    /// - APP_VERSION: defaults to 1
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("APP_HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse("APP_PORT", "8080")?;
        let api_version = env_parse("APP_VERSION", "1")?;

        Ok(Self {
            host,
            port,
            api_version,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), 8080)
    }
}
