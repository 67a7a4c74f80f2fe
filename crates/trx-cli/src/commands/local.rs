//! Local command implementation.
//!
//! Runs one transform in-process the way the desktop client's local
//! transform mode does, printing the TRX response to stdout.

use crate::cli::LocalArgs;
use crate::error::Result;
use tracing::debug;
use trx_protocol::{decode_local, exception_message};
use trx_server::registry::TransformRegistry;
use trx_server::RegistryError;

/// Run the transform and return the encoded response.
///
/// An unknown transform name produces an exception envelope rather than
/// an error, so the client still receives well-formed XML.
pub fn run_local(args: &LocalArgs, registry: &TransformRegistry) -> Result<String> {
    let mut raw = vec![args.value.as_str()];
    if let Some(properties) = args.properties.as_deref() {
        raw.push(properties);
    }

    let request = decode_local(raw.as_slice())?;
    debug!(
        transform = %args.transform,
        properties = request.properties.len(),
        "Running local transform"
    );

    match registry.run(&args.transform, &request) {
        Ok(xml) => Ok(xml),
        Err(RegistryError::NotFound(name)) => Ok(exception_message(&format!(
            "No transform found with the name '{}'.",
            name
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Execute the local command.
pub fn execute_local(args: LocalArgs, registry: &TransformRegistry) -> Result<()> {
    println!("{}", run_local(&args, registry)?);
    Ok(())
}
