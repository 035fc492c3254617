//! # LavanFlow Edge Gate
//!
//! Access control at the edge of the web app: session and role cookies
//! decide between continuing and a redirect, and every page that is served
//! carries a fixed set of security headers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Edge Gate                                      │
//! │                                                                         │
//! │  ┌────────────────┐   ┌────────────────────┐   ┌─────────────────────┐ │
//! │  │  GateConfig    │──►│  gate_middleware   │──►│  inner service      │ │
//! │  │  (env vars)    │   │  decide() + headers│   │  (ServeDir, routes) │ │
//! │  └────────────────┘   └────────────────────┘   └─────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `GATE_PORT` - HTTP port (default: 3000)
//! - `GATE_BIND_ADDR` - Bind address (default: 0.0.0.0)
//! - `GATE_STATIC_DIR` - Built web app to serve (default: ./public)
//! - `GATE_SESSION_COOKIE` - Session cookie name (default: accessToken)
//! - `GATE_ROLE_COOKIE` - Role cookie name (default: userRole)

pub mod config;
pub mod error;
pub mod gate;

// Re-exports
pub use config::{ConfigError, GateConfig};
pub use error::{GateError, GateResult};
pub use gate::{
    apply_security_headers, decide, gate_middleware, is_gated_path, with_gate, GateDecision,
    Redirect, SECURITY_HEADERS,
};
