//! Resolves a DNS name to an IPv4 address.

use std::net::{IpAddr, ToSocketAddrs};
use trx_protocol::entities::{DNS_NAME, IPV4_ADDRESS};
use trx_protocol::{Request, Response, Transform, UiMessageType};
use trx_server::TransformMeta;

/// Looks up the A record of the input name
pub struct DnsToIp;

impl DnsToIp {
    /// Registration metadata
    pub fn meta() -> TransformMeta {
        TransformMeta::new(
            DNS_NAME,
            "Receive DNS name from the Client, and resolve to IP address.",
        )
        .with_display_name("DNS to IP")
        .with_output_entities([IPV4_ADDRESS])
    }

    fn resolve(name: &str) -> std::io::Result<Option<IpAddr>> {
        let addr = (name, 0)
            .to_socket_addrs()?
            .map(|a| a.ip())
            .find(IpAddr::is_ipv4);
        Ok(addr)
    }
}

impl Transform for DnsToIp {
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        match Self::resolve(&request.value) {
            Ok(Some(ip)) => {
                response.add_entity(IPV4_ADDRESS, ip.to_string());
            }
            Ok(None) => response.add_ui_message(
                format!("Error: no IPv4 address for {}", request.value),
                UiMessageType::PartialError,
            ),
            Err(e) => response.add_ui_message(format!("Error: {}", e), UiMessageType::PartialError),
        }

        response.add_ui_message(
            format!("Slider value is at: {}", request.slider),
            UiMessageType::Inform,
        );
        Ok(())
    }
}
