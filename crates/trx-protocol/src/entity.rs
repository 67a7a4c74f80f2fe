//! Entity module - the nodes a transform adds to the graph

use crate::entities::PHRASE;
use crate::link::{
    BookmarkColor, LinkDirection, LinkStyle, BOOKMARK_FIELD, LINK_COLOR_FIELD,
    LINK_DIRECTION_FIELD, LINK_LABEL_FIELD, LINK_STYLE_FIELD, LINK_THICKNESS_FIELD, NOTES_FIELD,
};
use crate::overlay::{Overlay, OverlayPosition, OverlayType};
use std::fmt;

/// Weight assigned to new entities
pub const DEFAULT_WEIGHT: i32 = 100;

/// Default title for display information sections
pub const DEFAULT_DISPLAY_TITLE: &str = "Info";

/// How the client merges a property when deciding whether two entities are the same
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchingRule {
    /// Values must match for the entities to merge
    Strict,
    /// Property is ignored when merging
    #[default]
    Loose,
}

impl MatchingRule {
    /// Normalize a free-form rule.
    ///
    /// Only `"strict"` (any case, surrounding whitespace ignored) is strict;
    /// every other input is loose.
    ///
    /// # Examples
    ///
    /// ```
    /// use trx_protocol::MatchingRule;
    ///
    /// assert_eq!(MatchingRule::parse(" STRICT "), MatchingRule::Strict);
    /// assert_eq!(MatchingRule::parse("exact"), MatchingRule::Loose);
    /// assert_eq!(MatchingRule::parse(""), MatchingRule::Loose);
    /// ```
    pub fn parse(rule: &str) -> Self {
        if rule.trim().eq_ignore_ascii_case("strict") {
            MatchingRule::Strict
        } else {
            MatchingRule::Loose
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingRule::Strict => "strict",
            MatchingRule::Loose => "loose",
        }
    }
}

impl From<&str> for MatchingRule {
    fn from(rule: &str) -> Self {
        MatchingRule::parse(rule)
    }
}

impl From<Option<&str>> for MatchingRule {
    fn from(rule: Option<&str>) -> Self {
        rule.map(MatchingRule::parse).unwrap_or_default()
    }
}

impl fmt::Display for MatchingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property on an output entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalField {
    /// Property id; fields with an empty name are never serialized
    pub name: String,
    /// Label shown in the client
    pub display_name: String,
    /// Merge behaviour
    pub matching_rule: MatchingRule,
    /// Property value
    pub value: String,
}

/// A titled block of HTML shown in the client's detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInformation {
    /// Section title
    pub title: String,
    /// HTML content, emitted verbatim inside CDATA
    pub content: String,
}

/// An entity to add to the graph
///
/// Built through [`Response::add_entity`](crate::Response::add_entity) and
/// then decorated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Entity type id, e.g. `maltego.Domain`
    pub entity_type: String,

    /// Entity value
    pub value: String,

    /// Link weight
    pub weight: i32,

    /// Detail-view sections, in insertion order
    pub display_information: Vec<DisplayInformation>,

    /// Properties, in insertion order
    pub additional_fields: Vec<AdditionalField>,

    /// Icon override; empty means the type's default icon
    pub icon_url: String,

    /// Overlays, in insertion order
    pub overlays: Vec<Overlay>,
}

impl Entity {
    /// Create an entity.
    ///
    /// An empty type falls back to `maltego.Phrase`.
    pub fn new(entity_type: impl Into<String>, value: impl Into<String>) -> Self {
        let entity_type = entity_type.into();
        Self {
            entity_type: if entity_type.is_empty() {
                PHRASE.to_string()
            } else {
                entity_type
            },
            value: value.into(),
            weight: DEFAULT_WEIGHT,
            display_information: Vec::new(),
            additional_fields: Vec::new(),
            icon_url: String::new(),
            overlays: Vec::new(),
        }
    }

    /// Change the type; an empty type is ignored
    pub fn set_type(&mut self, entity_type: impl Into<String>) -> &mut Self {
        let entity_type = entity_type.into();
        if !entity_type.is_empty() {
            self.entity_type = entity_type;
        }
        self
    }

    /// Change the value
    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Change the weight
    pub fn set_weight(&mut self, weight: i32) -> &mut Self {
        self.weight = weight;
        self
    }

    /// Append a display information section; empty content is ignored
    pub fn add_display_information(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        let content = content.into();
        if !content.is_empty() {
            let title = title.into();
            self.display_information.push(DisplayInformation {
                title: if title.is_empty() {
                    DEFAULT_DISPLAY_TITLE.to_string()
                } else {
                    title
                },
                content,
            });
        }
        self
    }

    /// Append a property
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        matching_rule: impl Into<MatchingRule>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.additional_fields.push(AdditionalField {
            name: name.into(),
            display_name: display_name.into(),
            matching_rule: matching_rule.into(),
            value: value.into(),
        });
        self
    }

    /// Set the icon override; an empty URL is ignored
    pub fn set_icon_url(&mut self, url: impl Into<String>) -> &mut Self {
        let url = url.into();
        if !url.is_empty() {
            self.icon_url = url;
        }
        self
    }

    /// Append an overlay
    pub fn add_overlay(
        &mut self,
        property_name: impl Into<String>,
        position: OverlayPosition,
        overlay_type: OverlayType,
    ) -> &mut Self {
        self.overlays.push(Overlay {
            property_name: property_name.into(),
            position,
            overlay_type,
        });
        self
    }

    /// Colour of the link from the input entity, e.g. `#ff0000`
    pub fn set_link_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.add_property(LINK_COLOR_FIELD, "LinkColor", MatchingRule::Loose, color)
    }

    /// Line style of the link from the input entity
    pub fn set_link_style(&mut self, style: LinkStyle) -> &mut Self {
        self.add_property(LINK_STYLE_FIELD, "LinkStyle", MatchingRule::Loose, style.as_str())
    }

    /// Line thickness of the link from the input entity
    pub fn set_link_thickness(&mut self, thickness: u32) -> &mut Self {
        self.add_property(
            LINK_THICKNESS_FIELD,
            "Thickness",
            MatchingRule::Loose,
            thickness.to_string(),
        )
    }

    /// Label on the link from the input entity
    pub fn set_link_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.add_property(LINK_LABEL_FIELD, "Label", MatchingRule::Loose, label)
    }

    /// Direction of the link arrow
    pub fn set_link_direction(&mut self, direction: LinkDirection) -> &mut Self {
        self.add_property(
            LINK_DIRECTION_FIELD,
            "link.direction",
            MatchingRule::Loose,
            direction.as_str(),
        )
    }

    /// Bookmark the entity
    pub fn set_bookmark(&mut self, color: BookmarkColor) -> &mut Self {
        self.add_property(BOOKMARK_FIELD, "Bookmark", MatchingRule::Loose, color.as_str())
    }

    /// Attach a note
    pub fn set_note(&mut self, note: impl Into<String>) -> &mut Self {
        self.add_property(NOTES_FIELD, "Notes", MatchingRule::Loose, note)
    }

    /// Fields that will actually be serialized (those with a name)
    pub fn named_fields(&self) -> impl Iterator<Item = &AdditionalField> {
        self.additional_fields.iter().filter(|f| !f.name.is_empty())
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(PHRASE, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_defaults() {
        let entity = Entity::new("", "");
        assert_eq!(entity.entity_type, "maltego.Phrase");
        assert_eq!(entity.value, "");
        assert_eq!(entity.weight, 100);
        assert!(entity.display_information.is_empty());
        assert!(entity.additional_fields.is_empty());
        assert!(entity.icon_url.is_empty());
        assert!(entity.overlays.is_empty());
    }

    #[test]
    fn test_entities_own_their_containers() {
        let mut first = Entity::default();
        let second = Entity::default();
        first.add_property("a", "A", "loose", "1");

        assert_eq!(first.additional_fields.len(), 1);
        assert!(second.additional_fields.is_empty());
    }

    #[test]
    fn test_set_type_ignores_empty() {
        let mut entity = Entity::new("maltego.Domain", "paterva.com");
        entity.set_type("");
        assert_eq!(entity.entity_type, "maltego.Domain");
    }

    #[test]
    fn test_display_information_default_title() {
        let mut entity = Entity::default();
        entity.add_display_information("", "<b>hi</b>");
        entity.add_display_information("Ignored", "");

        assert_eq!(entity.display_information.len(), 1);
        assert_eq!(entity.display_information[0].title, "Info");
    }

    #[test]
    fn test_link_helpers_store_reserved_fields() {
        let mut entity = Entity::default();
        entity
            .set_link_color("#000000")
            .set_link_style(LinkStyle::Dotted)
            .set_link_thickness(3)
            .set_link_label("resolves to")
            .set_link_direction(LinkDirection::Bidirectional)
            .set_bookmark(BookmarkColor::Green)
            .set_note("checked");

        let names: Vec<&str> = entity
            .additional_fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "link#maltego.link.color",
                "link#maltego.link.style",
                "link#maltego.link.thickness",
                "link#maltego.link.label",
                "link#maltego.link.direction",
                "bookmark#",
                "notes#",
            ]
        );
        assert_eq!(entity.additional_fields[1].value, "2");
        assert_eq!(entity.additional_fields[2].value, "3");
        assert_eq!(entity.additional_fields[5].value, "1");
    }

    #[test]
    fn test_named_fields_skips_empty_names() {
        let mut entity = Entity::default();
        entity.add_property("", "Nameless", "loose", "x");
        entity.add_property("kept", "Kept", "strict", "y");

        let named: Vec<_> = entity.named_fields().collect();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name, "kept");
        assert_eq!(named[0].matching_rule, MatchingRule::Strict);
    }

    #[test]
    fn test_matching_rule_from_option() {
        assert_eq!(MatchingRule::from(None), MatchingRule::Loose);
        assert_eq!(MatchingRule::from(Some("Strict")), MatchingRule::Strict);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: only "strict" in some casing and padding is strict
        #[test]
        fn test_matching_rule_normalization(
            rule in "[ \\t]{0,2}[sStRiIcClLoOeEx]{0,7}[ \\t]{0,2}"
        ) {
            let expected = if rule.trim().to_lowercase() == "strict" {
                MatchingRule::Strict
            } else {
                MatchingRule::Loose
            };
            prop_assert_eq!(MatchingRule::parse(&rule), expected);
        }

        /// Property: arbitrary input never panics and yields one of the two rules
        #[test]
        fn test_matching_rule_total(rule in ".*") {
            let parsed = MatchingRule::parse(&rule);
            prop_assert!(parsed == MatchingRule::Strict || parsed == MatchingRule::Loose);
        }

        /// Property: exactly the named fields are encoded, and an entity with
        /// no named field has no AdditionalFields block
        #[test]
        fn test_unnamed_fields_never_encoded(
            fields in prop::collection::vec(("([a-z]{1,8})?", "[a-z0-9 ]{0,8}"), 0..8)
        ) {
            let mut response = crate::Response::new();
            let entity = response.add_entity(PHRASE, "x");
            for (name, value) in &fields {
                entity.add_property(name.as_str(), "Display", "loose", value.as_str());
            }
            let xml = crate::encode_response(&response);

            let expected: Vec<String> = fields
                .iter()
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, _)| name.clone())
                .collect();

            let mut encoded = Vec::new();
            let mut reader = quick_xml::Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Start(e)) if e.name().as_ref() == b"Field" => {
                        let name = e
                            .try_get_attribute("Name")
                            .ok()
                            .flatten()
                            .map(|a| String::from_utf8_lossy(&a.value).into_owned())
                            .unwrap_or_default();
                        encoded.push(name);
                    }
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => return Err(TestCaseError::fail(e.to_string())),
                }
            }

            prop_assert_eq!(&encoded, &expected);
            prop_assert_eq!(xml.contains("<AdditionalFields>"), !expected.is_empty());
        }
    }
}
