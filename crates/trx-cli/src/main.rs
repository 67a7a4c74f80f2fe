//! trx - Serve and run Maltego transforms.

use clap::Parser;
use trx_cli::commands;
use trx_cli::{build_registry, Cli, Command, Formatter};
use trx_server::init_tracing;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> trx_cli::Result<()> {
    let cli = Cli::parse();
    let formatter = Formatter::new(!cli.no_color);

    // runserver installs its own subscriber at the configured level
    if !matches!(cli.command, Command::Runserver(_)) {
        init_tracing("warn");
    }

    let registry = build_registry()?;

    match cli.command {
        Command::Runserver(args) => {
            commands::execute_runserver(args, registry, &formatter).await?;
        }
        Command::List(args) => {
            commands::execute_list(args, &registry, &formatter)?;
        }
        Command::Local(args) => {
            commands::execute_local(args, &registry)?;
        }
        Command::Export(args) => {
            commands::execute_export(args, &registry, &formatter)?;
        }
    }

    Ok(())
}
