//! Listen address of the hotel API, read from `HOST` and `PORT`.

use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Port the front-desk client is built against
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, as handed to the TCP listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// A blank or unset `HOST` binds every interface. `PORT` must be 1..=65535.
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", "").trim().to_string();
        let host = if host.is_empty() {
            Ipv4Addr::UNSPECIFIED.to_string()
        } else {
            host
        };

        let port: u16 = env_parse_or("PORT", DEFAULT_PORT)?;
        if port == 0 {
            return Err(ConfigError::ParseError {
                key: "PORT".to_string(),
                details: "port must be between 1 and 65535".to_string(),
            });
        }

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
