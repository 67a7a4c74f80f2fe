//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use trx_server::TransformMeta;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format transform metadata.
    pub fn format_transforms(&self, metas: &[&TransformMeta], format: CliFormat) -> Result<String> {
        match format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(metas)?),
            CliFormat::Table => Ok(self.format_transforms_table(metas)),
        }
    }

    fn format_transforms_table(&self, metas: &[&TransformMeta]) -> String {
        if metas.is_empty() {
            return self.colorize("No transforms registered.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Display Name", "Input", "Outputs", "Settings"]);

        for meta in metas {
            let settings: Vec<&str> = meta.settings.iter().map(|s| s.name.as_str()).collect();
            builder.push_record([
                meta.name.clone(),
                meta.display_name.clone(),
                meta.input_entity.clone(),
                meta.output_entities.join(", "),
                settings.join(", "),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_meta() -> TransformMeta {
        let mut meta = TransformMeta::new("maltego.Person", "Greets a person")
            .with_display_name("Greet Person")
            .with_output_entities(["maltego.Phrase"]);
        meta.name = "greetperson".to_string();
        meta
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(false);
        let meta = create_test_meta();
        let output = formatter
            .format_transforms(&[&meta], CliFormat::Table)
            .unwrap();
        assert!(output.contains("Display Name"));
        assert!(output.contains("greetperson"));
        assert!(output.contains("maltego.Phrase"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(false);
        let meta = create_test_meta();
        let output = formatter
            .format_transforms(&[&meta], CliFormat::Json)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["name"], "greetperson");
        assert_eq!(parsed[0]["input_entity"], "maltego.Person");
    }

    #[test]
    fn test_empty_table() {
        let formatter = Formatter::new(false);
        let output = formatter.format_transforms(&[], CliFormat::Table).unwrap();
        assert_eq!(output, "No transforms registered.");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
