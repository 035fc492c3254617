//! # LavanFlow Edge Gate
//!
//! Serves the built web app with the access gate in front of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser ───► HTTP (3000) ───► gate ───► ServeDir (GATE_STATIC_DIR)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::Router;
use edge_gate::{with_gate, GateConfig, GateError, GateResult};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> GateResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting LavanFlow edge gate...");

    // Load configuration
    let config = GateConfig::load()?;
    let addr = config.socket_addr();
    info!(
        %addr,
        static_dir = %config.static_dir.display(),
        "Configuration loaded"
    );

    let app = with_gate(
        Router::new().fallback_service(ServeDir::new(&config.static_dir)),
        config,
    )
    .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await.map_err(|source| GateError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    info!(%addr, "Edge gate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(GateError::Serve)?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
