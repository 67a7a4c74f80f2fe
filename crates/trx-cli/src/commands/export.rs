//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use std::path::PathBuf;
use trx_server::config::ServerConfig;
use trx_server::export::{write_settings_config, write_transforms_config};
use trx_server::mtz::{write_local_mtz, LocalCommand};
use trx_server::registry::TransformRegistry;

/// Execute the export command.
pub fn execute_export(
    args: ExportArgs,
    registry: &TransformRegistry,
    formatter: &Formatter,
) -> Result<()> {
    let config = ServerConfig::from_file(&args.config)?;
    fs::create_dir_all(&args.out_dir)?;

    if args.mtz {
        let local = LocalCommand {
            working_dir: args.working_dir.clone(),
            command: current_command(),
            ..LocalCommand::default()
        };
        let path = write_local_mtz(registry, &config, &args.out_dir.join("local.mtz"), &local)?;
        println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        println!(
            "{}",
            formatter.info("Import this bundle in the desktop client to add the local transforms")
        );
        return Ok(());
    }

    let transforms_path = args.out_dir.join("transforms.csv");
    let mut written = write_transforms_config(registry, &config, &transforms_path)?;
    written.extend(write_settings_config(
        registry,
        &config,
        &args.out_dir.join("settings.csv"),
    )?);

    for path in &written {
        println!("{}", formatter.success(&format!("Wrote {}", path.display())));
    }
    println!(
        "{}",
        formatter.info("Import these files on your Transform Distribution Server")
    );
    Ok(())
}

/// Path of the running `trx` binary, so the client can find it
fn current_command() -> String {
    std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| PathBuf::from("trx").display().to_string())
}
