//! Maltego TRX Protocol Layer
//!
//! This crate contains the message codec and dispatch contract for the
//! Maltego Transform Exchange (TRX) protocol. It has no I/O of its own:
//! bytes come in from whatever transport hosts it (HTTP, local CLI
//! invocation) and an XML string goes back out.
//!
//! ## Key Concepts
//!
//! - **Request**: the decoded input entity, its properties, the slider
//!   (soft limit) and the transform settings passed along by the server
//! - **Entity**: a typed node to add to the investigation graph
//! - **Response**: the entities, UI messages and exceptions a transform produces
//! - **Transform**: a handler that populates a response from a request
//! - **Genealogy**: the type-inheritance chain of the input entity, used to
//!   translate legacy (v2) property names
//!
//! ## Control Flow
//!
//! ```text
//! bytes -> decode_request -> run_transform -> Transform::create_entities
//!                                          -> encode_response -> bytes
//! ```
//!
//! Every request and response is created fresh per invocation and owns its
//! containers; nothing in this crate holds state across requests.
//!
//! # Example
//!
//! ```
//! use trx_protocol::{decode_local, run_transform, Request, Response};
//!
//! fn greet(request: &Request, response: &mut Response) -> anyhow::Result<()> {
//!     response.add_entity("maltego.Phrase", format!("Hi {}!", request.value));
//!     Ok(())
//! }
//!
//! let request = decode_local(&["Spencer"]).unwrap();
//! let xml = run_transform(&greet, &request);
//! assert!(xml.contains("<Value>Hi Spencer!</Value>"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod encode;
pub mod entities;
pub mod entity;
pub mod error;
pub mod legacy;
pub mod link;
pub mod local_args;
pub mod overlay;
pub mod request;
pub mod response;
pub mod transform;
pub mod xml;

// Re-exports for convenience
pub use decode::decode_request;
pub use encode::{encode_response, encode_response_with, exception_message, EncodeOptions};
pub use entity::{AdditionalField, DisplayInformation, Entity, MatchingRule};
pub use error::ProtocolError;
pub use legacy::translate_legacy_property_name;
pub use link::{BookmarkColor, LinkDirection, LinkStyle};
pub use local_args::decode_local;
pub use overlay::{Overlay, OverlayPosition, OverlayType};
pub use request::{GenealogyEntry, Request};
pub use response::{Response, UiMessage, UiMessageType};
pub use transform::{run_transform, Transform, GENERIC_ERROR_MESSAGE};
