//! Request module - the decoded input of a transform

use crate::entity::DEFAULT_WEIGHT;
use crate::legacy::{legacy_properties, translate_legacy_property_name};
use std::collections::HashMap;

/// One step of the input entity's type-inheritance chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenealogyEntry {
    /// Entity type id
    pub name: String,
    /// Previous id of the type, if it was renamed
    pub old_name: Option<String>,
}

impl GenealogyEntry {
    /// Create an entry without an old name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            old_name: None,
        }
    }
}

/// A decoded transform request
///
/// Produced by [`decode_request`](crate::decode_request) for server
/// invocations and by [`decode_local`](crate::decode_local) for local
/// command-line invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Value of the input entity
    pub value: String,

    /// Type id of the input entity
    pub entity_type: String,

    /// Weight of the input entity
    pub weight: i32,

    /// Soft limit configured in the client; bounds how many results to return
    pub slider: i32,

    /// Type-inheritance chain, in the order received
    pub genealogy: Vec<GenealogyEntry>,

    /// Input entity properties, including legacy-translated duplicates
    pub properties: HashMap<String, String>,

    /// Transform settings passed along by the server
    pub settings: HashMap<String, String>,
}

impl Request {
    /// Create a request with empty genealogy, properties and settings
    pub fn new(value: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            entity_type: entity_type.into(),
            weight: DEFAULT_WEIGHT,
            slider: 0,
            genealogy: Vec::new(),
            properties: HashMap::new(),
            settings: HashMap::new(),
        }
    }

    /// Look up an input entity property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Look up a transform setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Insert a property, also writing it under every v3 name its v2 name
    /// maps to for the types in the genealogy.
    ///
    /// The old key is kept.
    pub fn insert_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        for entry in &self.genealogy {
            if let Some(new_name) = translate_legacy_property_name(&entry.name, &name) {
                self.properties.insert(new_name.to_string(), value.clone());
            }
        }

        self.properties.insert(name, value);
    }

    /// Remove every v2 property name the legacy table lists for the types in
    /// the genealogy.
    ///
    /// Decoding never does this on its own; call it when a transform wants
    /// to see only current property names.
    pub fn clear_legacy_properties(&mut self) {
        for entry in &self.genealogy {
            for (old_name, _) in legacy_properties(&entry.name) {
                self.properties.remove(*old_name);
            }
        }
    }
}
