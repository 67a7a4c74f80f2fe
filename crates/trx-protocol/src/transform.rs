//! Transform dispatch contract and fault containment

use crate::encode::{encode_response, exception_message};
use crate::request::Request;
use crate::response::Response;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error};

/// The message sent to the client when a transform fails
pub const GENERIC_ERROR_MESSAGE: &str =
    "An exception occurred with the transform. Check the logs for more details.";

/// A transform handler.
///
/// Handlers read the request and add entities and messages to the
/// response. They are shared across concurrent requests, so they must not
/// rely on interior state between calls.
///
/// Any function or closure with the signature
/// `Fn(&Request, &mut Response) -> anyhow::Result<()>` is a `Transform`.
pub trait Transform: Send + Sync {
    /// Populate `response` from `request`.
    ///
    /// Returning an error discards whatever was added to `response`; the
    /// client receives a generic failure message and the error is logged.
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()>;
}

impl<F> Transform for F
where
    F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync,
{
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        self(request, response)
    }
}

/// Run a transform and encode its output.
///
/// Never fails: handler errors and panics are logged and replaced with a
/// response holding a single `PartialError` UI message.
pub fn run_transform<T: Transform + ?Sized>(transform: &T, request: &Request) -> String {
    let mut response = Response::new();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        transform.create_entities(request, &mut response)
    }));

    match outcome {
        Ok(Ok(())) => {
            debug!(
                entities = response.entities.len(),
                ui_messages = response.ui_messages.len(),
                "Transform completed"
            );
            encode_response(&response)
        }
        Ok(Err(e)) => {
            error!(
                entity_type = %request.entity_type,
                value = %request.value,
                "Transform failed: {:#}",
                e
            );
            exception_message(GENERIC_ERROR_MESSAGE)
        }
        Err(payload) => {
            error!(
                entity_type = %request.entity_type,
                value = %request.value,
                "Transform panicked: {}",
                panic_message(payload.as_ref())
            );
            exception_message(GENERIC_ERROR_MESSAGE)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
