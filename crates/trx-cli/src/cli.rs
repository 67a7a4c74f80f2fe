//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// trx - Run and inspect Maltego transforms.
#[derive(Debug, Parser)]
#[command(name = "trx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the bundled transforms over HTTP
    Runserver(RunserverArgs),

    /// List the bundled transforms
    List(ListArgs),

    /// Run a transform locally and print its TRX response
    Local(LocalArgs),

    /// Write the TDS transforms and settings CSV files, or a local .mtz bundle
    Export(ExportArgs),
}

/// Arguments for the runserver command.
#[derive(Debug, Parser)]
pub struct RunserverArgs {
    /// Configuration file path
    #[arg(short, long, env = "TRX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address, overrides the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}

/// Arguments for the local command.
#[derive(Debug, Parser)]
pub struct LocalArgs {
    /// Transform name (e.g., greetperson)
    pub transform: String,

    /// Input entity value
    pub value: String,

    /// Input entity properties (format: name=value#name=value)
    pub properties: Option<String>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Configuration file path
    #[arg(short, long, env = "TRX_CONFIG")]
    pub config: PathBuf,

    /// Directory the exported files are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write local.mtz for importing the transforms as local transforms
    #[arg(long)]
    pub mtz: bool,

    /// Working directory the client runs local transforms in
    #[arg(long, default_value = ".")]
    pub working_dir: PathBuf,
}
