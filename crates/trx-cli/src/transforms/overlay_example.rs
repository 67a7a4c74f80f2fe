//! Shows the overlay kinds the client can draw on an entity.

use trx_protocol::entities::{PERSON, PHRASE};
use trx_protocol::{MatchingRule, OverlayPosition, OverlayType, Request, Response, Transform};
use trx_server::TransformMeta;

/// Returns a phrase decorated with image, text and colour overlays
pub struct OverlayExample;

impl OverlayExample {
    /// Registration metadata
    pub fn meta() -> TransformMeta {
        TransformMeta::new(PERSON, "Returns a phrase with overlays on the graph.")
            .with_display_name("Overlay Example")
            .with_output_entities([PHRASE])
    }
}

impl Transform for OverlayExample {
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        let greeting = format!("Hi {}, nice to meet you!", request.value);
        let entity = response.add_entity(PHRASE, greeting);

        // Overlays reference a property; the client draws that property's value
        entity
            .add_property(
                "dynamic_overlay_icon_name",
                "Name for overlay image",
                MatchingRule::Loose,
                "Champion",
            )
            .add_overlay("dynamic_overlay_icon_name", OverlayPosition::West, OverlayType::Image);

        // A literal value works too, unless a property of that name exists
        entity.add_overlay("DE", OverlayPosition::SouthWest, OverlayType::Image);

        entity
            .add_property(
                "exampleDynamicPropertyName",
                "Example Dynamic Property",
                MatchingRule::Loose,
                "Maltego Overlay Testing",
            )
            .add_overlay("exampleDynamicPropertyName", OverlayPosition::North, OverlayType::Text);

        entity.add_overlay("#45e06f", OverlayPosition::NorthWest, OverlayType::Colour);
        Ok(())
    }
}
