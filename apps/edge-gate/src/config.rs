//! Edge gate configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Edge gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// HTTP port (default: 3000)
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_addr: IpAddr,

    /// Directory holding the built web app
    pub static_dir: PathBuf,

    /// Cookie carrying the session token
    pub session_cookie: String,

    /// Cookie carrying the user's role name
    pub role_cookie: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            port: 3000,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            static_dir: PathBuf::from("./public"),
            session_cookie: "accessToken".to_string(),
            role_cookie: "userRole".to_string(),
        }
    }
}

impl GateConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = GateConfig::default();

        let config = GateConfig {
            port: match env::var("GATE_PORT") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("GATE_PORT".to_string()))?,
                Err(_) => defaults.port,
            },

            bind_addr: match env::var("GATE_BIND_ADDR") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("GATE_BIND_ADDR".to_string()))?,
                Err(_) => defaults.bind_addr,
            },

            static_dir: env::var("GATE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),

            session_cookie: env::var("GATE_SESSION_COOKIE").unwrap_or(defaults.session_cookie),

            role_cookie: env::var("GATE_ROLE_COOKIE").unwrap_or(defaults.role_cookie),
        };

        if config.session_cookie.trim().is_empty() {
            return Err(ConfigError::InvalidValue("GATE_SESSION_COOKIE".to_string()));
        }
        if config.role_cookie.trim().is_empty() {
            return Err(ConfigError::InvalidValue("GATE_ROLE_COOKIE".to_string()));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
