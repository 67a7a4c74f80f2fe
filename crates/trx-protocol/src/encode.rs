//! Response encoder - [`Response`] into TRX XML
//!
//! Encoding is infallible. Every string passes through the XML writer,
//! which strips characters XML cannot carry and escapes the rest.

use crate::entity::Entity;
use crate::response::{Response, UiMessageType};
use crate::xml::XmlWriter;

/// Output format switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Sort attributes, never self-close elements and write display
    /// information as escaped text instead of CDATA
    pub canonical: bool,
}

impl EncodeOptions {
    /// Options for byte-stable output
    pub fn canonical() -> Self {
        Self { canonical: true }
    }
}

/// Encode a response in the default (compact) format.
///
/// A response with exceptions encodes as an exception message; its
/// entities and UI messages are dropped.
///
/// # Examples
///
/// ```
/// use trx_protocol::{encode_response, Response};
///
/// let mut response = Response::new();
/// response.add_entity("maltego.Phrase", "Hello Spencer!");
///
/// let xml = encode_response(&response);
/// assert!(xml.contains(r#"<Entity Type="maltego.Phrase"><Value>Hello Spencer!</Value>"#));
/// assert!(xml.contains("<Weight>100</Weight></Entity>"));
/// assert!(xml.contains("<UIMessages></UIMessages>"));
/// ```
pub fn encode_response(response: &Response) -> String {
    encode_response_with(response, EncodeOptions::default())
}

/// Encode a response with explicit options
pub fn encode_response_with(response: &Response, options: EncodeOptions) -> String {
    let mut w = XmlWriter::new(options.canonical);
    w.start("MaltegoMessage", &[]);

    if response.has_exceptions() {
        w.start("MaltegoTransformExceptionMessage", &[]);
        w.start("Exceptions", &[]);
        for exception in &response.exceptions {
            w.text_element("Exception", &[], exception);
        }
        w.end("Exceptions");
        w.end("MaltegoTransformExceptionMessage");
    } else {
        w.start("MaltegoTransformResponseMessage", &[]);

        w.start("Entities", &[]);
        for entity in &response.entities {
            write_entity(&mut w, entity);
        }
        w.end("Entities");

        w.start("UIMessages", &[]);
        for message in &response.ui_messages {
            w.text_element(
                "UIMessage",
                &[("MessageType", message.message_type.as_str())],
                &message.text,
            );
        }
        w.end("UIMessages");

        w.end("MaltegoTransformResponseMessage");
    }

    w.end("MaltegoMessage");
    w.into_string()
}

fn write_entity(w: &mut XmlWriter, entity: &Entity) {
    w.start("Entity", &[("Type", entity.entity_type.as_str())]);
    w.text_element("Value", &[], &entity.value);
    w.text_element("Weight", &[], &entity.weight.to_string());

    if !entity.display_information.is_empty() {
        w.start("DisplayInformation", &[]);
        for info in &entity.display_information {
            w.start("Label", &[("Name", info.title.as_str()), ("Type", "text/html")]);
            w.cdata(&info.content);
            w.end("Label");
        }
        w.end("DisplayInformation");
    }

    let mut fields = entity.named_fields().peekable();
    if fields.peek().is_some() {
        w.start("AdditionalFields", &[]);
        for field in fields {
            w.text_element(
                "Field",
                &[
                    ("MatchingRule", field.matching_rule.as_str()),
                    ("Name", field.name.as_str()),
                    ("DisplayName", field.display_name.as_str()),
                ],
                &field.value,
            );
        }
        w.end("AdditionalFields");
    }

    if !entity.overlays.is_empty() {
        w.start("Overlays", &[]);
        for overlay in &entity.overlays {
            w.empty(
                "Overlay",
                &[
                    ("propertyName", overlay.property_name.as_str()),
                    ("position", overlay.position.as_str()),
                    ("type", overlay.overlay_type.as_str()),
                ],
            );
        }
        w.end("Overlays");
    }

    if !entity.icon_url.is_empty() {
        w.text_element("IconURL", &[], &entity.icon_url);
    }

    w.end("Entity");
}

/// A response carrying only a single `PartialError` UI message.
///
/// Used when a transform could not produce output of its own.
pub fn exception_message(text: &str) -> String {
    let mut response = Response::new();
    response.add_ui_message(text, UiMessageType::PartialError);
    encode_response(&response)
}
