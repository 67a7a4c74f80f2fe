//! Runserver command implementation.

use crate::cli::RunserverArgs;
use crate::error::Result;
use crate::output::Formatter;
use trx_server::config::ServerConfig;
use trx_server::registry::TransformRegistry;
use trx_server::{init_tracing, start_server};

/// Resolve the server configuration from the file and command-line overrides.
pub fn resolve_config(args: &RunserverArgs, formatter: &Formatter) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => {
            eprintln!(
                "{}",
                formatter.warning("No configuration file given, using defaults")
            );
            ServerConfig::default()
        }
    };

    if let Some(host) = &args.host {
        config.bind_address = host.clone();
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }
    Ok(config)
}

/// Execute the runserver command.
pub async fn execute_runserver(
    args: RunserverArgs,
    registry: TransformRegistry,
    formatter: &Formatter,
) -> Result<()> {
    let config = resolve_config(&args, formatter)?;
    init_tracing(&config.log_level);

    eprintln!(
        "{}",
        formatter.info(&format!(
            "Serving {} transforms on http://{}",
            registry.len(),
            config.bind_addr()
        ))
    );
    start_server(config, registry).await?;
    Ok(())
}
