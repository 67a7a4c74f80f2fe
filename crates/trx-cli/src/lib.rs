//! trx CLI library.
//!
//! Bundles the demo transforms and the commands that serve, run, list
//! and export them.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod transforms;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use transforms::build_registry;
