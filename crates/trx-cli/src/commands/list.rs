//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use trx_server::registry::TransformRegistry;

/// Execute the list command.
pub fn execute_list(
    args: ListArgs,
    registry: &TransformRegistry,
    formatter: &Formatter,
) -> Result<()> {
    let metas: Vec<_> = registry.metas().collect();
    println!("{}", formatter.format_transforms(&metas, args.format)?);
    Ok(())
}
