//! Maltego Transform Server
//!
//! Hosts registered transforms over HTTP and exports their TDS
//! configuration and local `.mtz` bundles. The protocol work itself lives
//! in `trx-protocol`; this crate only routes bytes to it.

#![warn(missing_docs)]

pub mod config;
pub mod export;
pub mod handlers;
pub mod mtz;
pub mod registry;

use config::ServerConfig;
use handlers::{create_router, AppState};
use registry::TransformRegistry;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, ProjectConfig};
pub use export::ExportError;
pub use mtz::LocalCommand;
pub use registry::{RegistryError, TransformMeta, TransformSet, TransformSetting};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more
/// than once is harmless.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Start the transform HTTP server
///
/// Takes ownership of the fully built registry and serves it until the
/// process is stopped.
pub async fn start_server(
    config: ServerConfig,
    registry: TransformRegistry,
) -> Result<(), ServerError> {
    info!("Starting Maltego transform server");
    info!("Bind address: {}", config.bind_addr());
    info!("Registered transforms: {}", registry.len());
    for name in registry.names() {
        info!("  /run/{}/", name);
    }

    let app = create_router(AppState::new(registry));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Transform server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(config.global_settings.is_empty());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("warn");
        init_tracing("debug");
    }

    #[test]
    fn test_error_display() {
        let err = ServerError::from(ConfigError::MissingField("project.host_url".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration field: project.host_url"
        );
    }
}
