//! Demo transforms bundled with the `trx` binary.

pub mod dns_to_ip;
pub mod greet_person;
pub mod greet_person_localized;
pub mod overlay_example;

use trx_server::registry::{TransformRegistry, TransformSetting};
use trx_server::RegistryError;

pub use dns_to_ip::DnsToIp;
pub use greet_person::GreetPerson;
pub use greet_person_localized::GreetPersonLocalized;
pub use overlay_example::OverlayExample;

/// Setting used by [`GreetPersonLocalized`]
pub fn language_setting() -> TransformSetting {
    TransformSetting::new("language", "Language")
        .with_default("en")
        .optional()
        .popup()
}

/// Build the registry of bundled transforms
pub fn build_registry() -> Result<TransformRegistry, RegistryError> {
    let mut registry = TransformRegistry::new();
    registry.register("GreetPerson", GreetPerson::meta(), GreetPerson)?;
    registry.register(
        "GreetPersonLocalized",
        GreetPersonLocalized::meta(),
        GreetPersonLocalized,
    )?;
    registry.register("OverlayExample", OverlayExample::meta(), OverlayExample)?;
    registry.register("DNSToIP", DnsToIp::meta(), DnsToIp)?;
    Ok(registry)
}
