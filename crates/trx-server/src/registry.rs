//! Transform registry.
//!
//! Transforms are registered explicitly at startup. After that the
//! registry is only read, so it is shared through an `Arc` without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use trx_protocol::xml::{name_to_path, pascal_case_to_title};
use trx_protocol::{run_transform, Request, Transform};

/// Registry error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A transform with the same path name is already registered
    #[error("Transform already registered: {0}")]
    Duplicate(String),

    /// No transform with this name
    #[error("No transform found with the name '{0}'.")]
    NotFound(String),
}

/// A named group of transforms shown together in the client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformSet {
    /// Set name
    pub name: String,
    /// Set description
    pub description: String,
}

impl TransformSet {
    /// Create a transform set
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A user-configurable input passed to the transform as a request setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSetting {
    /// Setting name, the key in [`Request::settings`]
    pub name: String,

    /// Label shown in the client
    pub display_name: String,

    /// One of `string`, `boolean`, `date`, `datetime`, `daterange`, `url`, `double`, `int`
    #[serde(default = "default_setting_type")]
    pub setting_type: String,

    /// Pre-filled value
    #[serde(default)]
    pub default_value: String,

    /// Whether the user may leave it empty
    #[serde(default)]
    pub optional: bool,

    /// Whether the client prompts for it on every run
    #[serde(default)]
    pub popup: bool,

    /// Global settings apply to every transform of the server
    #[serde(default)]
    pub global: bool,
}

fn default_setting_type() -> String {
    "string".to_string()
}

impl TransformSetting {
    /// Create a non-global string setting
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            setting_type: default_setting_type(),
            default_value: String::new(),
            optional: false,
            popup: false,
            global: false,
        }
    }

    /// Set the setting type
    pub fn with_type(mut self, setting_type: impl Into<String>) -> Self {
        self.setting_type = setting_type.into();
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Mark the setting optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Prompt for the setting on every run
    pub fn popup(mut self) -> Self {
        self.popup = true;
        self
    }

    /// Full id used in TDS configuration
    pub fn id(&self) -> String {
        if self.global {
            format!("global#{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Descriptive metadata of a registered transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformMeta {
    /// Path name, filled in on registration
    pub name: String,

    /// Name shown in the client; defaults to the title-cased registration name
    pub display_name: String,

    /// Entity type the transform runs on
    pub input_entity: String,

    /// Description shown in the client
    pub description: String,

    /// Entity types the transform may return
    pub output_entities: Vec<String>,

    /// Disclaimer the user must accept
    pub disclaimer: String,

    /// Transform-scoped settings
    pub settings: Vec<TransformSetting>,

    /// Set the transform belongs to
    pub transform_set: Option<TransformSet>,
}

impl TransformMeta {
    /// Create metadata for a transform on `input_entity`
    pub fn new(input_entity: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            display_name: String::new(),
            input_entity: input_entity.into(),
            description: description.into(),
            output_entities: Vec::new(),
            disclaimer: String::new(),
            settings: Vec::new(),
            transform_set: None,
        }
    }

    /// Override the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Declare the output entity types
    pub fn with_output_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_entities = entities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the disclaimer
    pub fn with_disclaimer(mut self, disclaimer: impl Into<String>) -> Self {
        self.disclaimer = disclaimer.into();
        self
    }

    /// Add a transform-scoped setting
    pub fn with_setting(mut self, setting: TransformSetting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Place the transform in a set
    pub fn with_transform_set(mut self, transform_set: TransformSet) -> Self {
        self.transform_set = Some(transform_set);
        self
    }
}

struct RegisteredTransform {
    meta: TransformMeta,
    handler: Arc<dyn Transform>,
}

/// Transform registry keyed by path name
#[derive(Default)]
pub struct TransformRegistry {
    transforms: Vec<RegisteredTransform>,
    index: HashMap<String, usize>,
}

impl TransformRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform under `name`.
    ///
    /// The lookup key is the path form of the name (lowercase, `_` becomes
    /// `-`), so `DNS_To_IP` is served at `/run/dns-to-ip`.
    pub fn register<T>(
        &mut self,
        name: &str,
        mut meta: TransformMeta,
        handler: T,
    ) -> Result<(), RegistryError>
    where
        T: Transform + 'static,
    {
        let path = name_to_path(name);
        if self.index.contains_key(&path) {
            warn!("Transform {} is registered twice", path);
            return Err(RegistryError::Duplicate(path));
        }

        if meta.display_name.is_empty() {
            meta.display_name = pascal_case_to_title(name);
        }
        meta.name = path.clone();

        info!("Registered transform {} ({})", path, meta.display_name);
        self.index.insert(path, self.transforms.len());
        self.transforms.push(RegisteredTransform {
            meta,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Look up a handler; the name is matched case-insensitively
    pub fn get(&self, name: &str) -> Option<Arc<dyn Transform>> {
        self.lookup(name).map(|t| Arc::clone(&t.handler))
    }

    /// Look up a transform's metadata
    pub fn meta(&self, name: &str) -> Option<&TransformMeta> {
        self.lookup(name).map(|t| &t.meta)
    }

    /// Run a transform by name and return the encoded response
    pub fn run(&self, name: &str, request: &Request) -> Result<String, RegistryError> {
        let transform = self
            .lookup(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(run_transform(transform.handler.as_ref(), request))
    }

    /// Path names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transforms.iter().map(|t| t.meta.name.as_str())
    }

    /// Metadata in registration order
    pub fn metas(&self) -> impl Iterator<Item = &TransformMeta> {
        self.transforms.iter().map(|t| &t.meta)
    }

    /// Transform sets with the path names of their members, in first-use order
    pub fn transform_sets(&self) -> Vec<(&TransformSet, Vec<&str>)> {
        let mut sets: Vec<(&TransformSet, Vec<&str>)> = Vec::new();
        for meta in self.metas() {
            let Some(set) = meta.transform_set.as_ref() else {
                continue;
            };
            match sets.iter_mut().find(|(s, _)| *s == set) {
                Some((_, members)) => members.push(meta.name.as_str()),
                None => sets.push((set, vec![meta.name.as_str()])),
            }
        }
        sets
    }

    /// Number of registered transforms
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no transform is registered
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<&RegisteredTransform> {
        self.index
            .get(&name_to_path(name))
            .map(|&i| &self.transforms[i])
    }
}
