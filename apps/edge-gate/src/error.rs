//! Error types for the edge gate server.

use crate::config::ConfigError;

/// Failures that stop the gate server. The gate itself never errors a
/// request; it only redirects.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type GateResult<T> = Result<T, GateError>;
