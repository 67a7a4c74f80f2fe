//! Error types for protocol decoding.

use thiserror::Error;

/// Errors surfaced while decoding a TRX message.
///
/// Numeric fields that fail to parse are not errors: the decoder logs a
/// warning and substitutes zero. Only structural problems reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload is not well-formed XML
    #[error("Malformed protocol message: {0}")]
    MalformedMessage(String),

    /// A node every transform request must carry is absent
    #[error("Malformed protocol message: missing <{0}> node")]
    MissingNode(&'static str),

    /// Local invocation without an entity value argument
    #[error("Local transform invocation requires an entity value")]
    MissingValue,

    /// A string could not be mapped onto one of the protocol's enumerations
    #[error("Invalid {kind}: {value}")]
    InvalidValue {
        /// Which enumeration was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl ProtocolError {
    /// Wrap any XML-layer error as a malformed message
    pub(crate) fn malformed(error: impl std::fmt::Display) -> Self {
        ProtocolError::MalformedMessage(error.to_string())
    }

    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        ProtocolError::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}
