//! Response module - what a transform sends back to the client

use crate::encode::{encode_response, encode_response_with, EncodeOptions};
use crate::entity::Entity;
use crate::error::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// Severity of a UI message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMessageType {
    /// Informational
    #[default]
    Inform,
    /// Debug output
    Debug,
    /// The transform failed entirely
    FatalError,
    /// The transform failed partway; results may be incomplete
    PartialError,
}

impl UiMessageType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UiMessageType::Inform => "Inform",
            UiMessageType::Debug => "Debug",
            UiMessageType::FatalError => "FatalError",
            UiMessageType::PartialError => "PartialError",
        }
    }
}

impl fmt::Display for UiMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiMessageType {
    type Err = ProtocolError;

    /// Accepts the wire names and the short names `inform`, `debug`,
    /// `fatal` and `partial`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inform" => Ok(UiMessageType::Inform),
            "debug" => Ok(UiMessageType::Debug),
            "fatal" | "fatalerror" => Ok(UiMessageType::FatalError),
            "partial" | "partialerror" => Ok(UiMessageType::PartialError),
            _ => Err(ProtocolError::invalid("UI message type", s)),
        }
    }
}

/// A message shown in the client's output window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    /// Message text
    pub text: String,
    /// Severity
    pub message_type: UiMessageType,
}

/// The output of one transform run.
///
/// When `exceptions` is non-empty the whole response encodes as an
/// exception message and `entities`/`ui_messages` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Entities in the order the client should lay them out
    pub entities: Vec<Entity>,
    /// UI messages in insertion order
    pub ui_messages: Vec<UiMessage>,
    /// Exception strings in insertion order
    pub exceptions: Vec<String>,
}

impl Response {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return it for decoration
    pub fn add_entity(
        &mut self,
        entity_type: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Entity {
        self.entities.push(Entity::new(entity_type, value));
        let last = self.entities.len() - 1;
        &mut self.entities[last]
    }

    /// Append a UI message
    pub fn add_ui_message(&mut self, text: impl Into<String>, message_type: UiMessageType) {
        self.ui_messages.push(UiMessage {
            text: text.into(),
            message_type,
        });
    }

    /// Append an exception; the response will encode as an exception message
    pub fn add_exception(&mut self, exception: impl Into<String>) {
        self.exceptions.push(exception.into());
    }

    /// Whether this response encodes as an exception message
    pub fn has_exceptions(&self) -> bool {
        !self.exceptions.is_empty()
    }

    /// Encode as TRX XML
    pub fn to_xml(&self) -> String {
        encode_response(self)
    }

    /// Encode as canonical TRX XML
    pub fn to_canonical_xml(&self) -> String {
        encode_response_with(self, EncodeOptions::canonical())
    }
}
