//! Reserved property names and value tables for link styling, bookmarks and notes.
//!
//! The Maltego client interprets these fields itself; on the wire they are
//! ordinary additional fields.

use crate::error::ProtocolError;
use std::str::FromStr;

/// Colour of the link to the new entity
pub const LINK_COLOR_FIELD: &str = "link#maltego.link.color";
/// Line style of the link, see [`LinkStyle`]
pub const LINK_STYLE_FIELD: &str = "link#maltego.link.style";
/// Line thickness of the link
pub const LINK_THICKNESS_FIELD: &str = "link#maltego.link.thickness";
/// Label drawn on the link
pub const LINK_LABEL_FIELD: &str = "link#maltego.link.label";
/// Direction of the link arrow, see [`LinkDirection`]
pub const LINK_DIRECTION_FIELD: &str = "link#maltego.link.direction";
/// Bookmark colour, see [`BookmarkColor`]
pub const BOOKMARK_FIELD: &str = "bookmark#";
/// Free-text note attached to the entity
pub const NOTES_FIELD: &str = "notes#";

/// Link line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Solid line
    #[default]
    Normal,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash and dot
    DashDot,
}

impl LinkStyle {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStyle::Normal => "0",
            LinkStyle::Dashed => "1",
            LinkStyle::Dotted => "2",
            LinkStyle::DashDot => "3",
        }
    }
}

impl FromStr for LinkStyle {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(LinkStyle::Normal),
            "dashed" => Ok(LinkStyle::Dashed),
            "dotted" => Ok(LinkStyle::Dotted),
            "dashdot" => Ok(LinkStyle::DashDot),
            _ => Err(ProtocolError::invalid("link style", s)),
        }
    }
}

/// Bookmark colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkColor {
    /// No bookmark
    #[default]
    None,
    /// Blue
    Blue,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Orange
    Orange,
    /// Red
    Red,
}

impl BookmarkColor {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkColor::None => "-1",
            BookmarkColor::Blue => "0",
            BookmarkColor::Green => "1",
            BookmarkColor::Yellow => "2",
            BookmarkColor::Orange => "3",
            BookmarkColor::Red => "4",
        }
    }
}

impl FromStr for BookmarkColor {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BookmarkColor::None),
            "blue" => Ok(BookmarkColor::Blue),
            "green" => Ok(BookmarkColor::Green),
            "yellow" => Ok(BookmarkColor::Yellow),
            "orange" => Ok(BookmarkColor::Orange),
            "red" => Ok(BookmarkColor::Red),
            _ => Err(ProtocolError::invalid("bookmark colour", s)),
        }
    }
}

/// Which way the link arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkDirection {
    /// From the new entity back to the input entity
    OutputToInput,
    /// From the input entity to the new entity
    #[default]
    InputToOutput,
    /// Both ways
    Bidirectional,
}

impl LinkDirection {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkDirection::OutputToInput => "output-to-input",
            LinkDirection::InputToOutput => "input-to-output",
            LinkDirection::Bidirectional => "bidirectional",
        }
    }
}

impl FromStr for LinkDirection {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "output-to-input" => Ok(LinkDirection::OutputToInput),
            "input-to-output" => Ok(LinkDirection::InputToOutput),
            "bidirectional" => Ok(LinkDirection::Bidirectional),
            _ => Err(ProtocolError::invalid("link direction", s)),
        }
    }
}
