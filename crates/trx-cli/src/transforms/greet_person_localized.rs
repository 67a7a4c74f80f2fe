//! Greets the input person in the language chosen in the `language` setting.

use super::language_setting;
use trx_protocol::entities::PHRASE;
use trx_protocol::{Request, Response, Transform};
use trx_server::TransformMeta;

/// Returns a localized phrase greeting the input
pub struct GreetPersonLocalized;

impl GreetPersonLocalized {
    /// Registration metadata
    pub fn meta() -> TransformMeta {
        TransformMeta::new(PHRASE, "Returns a localized Phrase greeting a Person.")
            .with_display_name("Greet Person (localized)")
            .with_output_entities([PHRASE])
            .with_setting(language_setting())
    }

    fn greeting(language: &str, name: &str) -> String {
        match language.to_lowercase().as_str() {
            "af" => format!("Hallo {}, lekker om jou te ontmoet!", name),
            "de" => format!("Moin {}, schön dich kennen zu lernen!", name),
            _ => format!("Hello {}, nice to meet you!", name),
        }
    }
}

impl Transform for GreetPersonLocalized {
    fn create_entities(&self, request: &Request, response: &mut Response) -> anyhow::Result<()> {
        let language = request.setting("language").unwrap_or("en");
        response.add_entity(PHRASE, Self::greeting(language, &request.value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages() {
        assert_eq!(
            GreetPersonLocalized::greeting("DE", "Ada"),
            "Moin Ada, schön dich kennen zu lernen!"
        );
        assert_eq!(
            GreetPersonLocalized::greeting("af", "Ada"),
            "Hallo Ada, lekker om jou te ontmoet!"
        );
        assert_eq!(
            GreetPersonLocalized::greeting("fr", "Ada"),
            "Hello Ada, nice to meet you!"
        );
    }

    #[test]
    fn test_uses_setting() {
        let mut request = Request::new("Ada", PHRASE);
        request.settings.insert("language".to_string(), "de".to_string());

        let mut response = Response::new();
        GreetPersonLocalized
            .create_entities(&request, &mut response)
            .unwrap();
        assert_eq!(response.entities[0].value, "Moin Ada, schön dich kennen zu lernen!");
    }

    #[test]
    fn test_defaults_to_english() {
        let mut response = Response::new();
        GreetPersonLocalized
            .create_entities(&Request::new("Ada", PHRASE), &mut response)
            .unwrap();
        assert_eq!(response.entities[0].value, "Hello Ada, nice to meet you!");
    }
}
