//! Greets the input person.

use trx_protocol::entities::PHRASE;
use trx_protocol::{Request, Response, Transform};
use trx_server::TransformMeta;

/// Returns a phrase greeting the input
pub struct GreetPerson;

impl GreetPerson {
    /// Registration metadata
    pub fn meta() -> TransformMeta {
        TransformMeta::new(PHRASE, "Returns a Phrase greeting a Person on the Graph.")
            .with_display_name("Greet Person")
            .with_output_entities([PHRASE])
    }
}

impl Transform for GreetPerson {
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        response.add_entity(PHRASE, format!("Hi {}, nice to meet you!", request.value));
        Ok(())
    }
}
