//! Entity overlays - small markers the client draws on top of an entity icon

use crate::error::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// Compass position of an overlay on the entity icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayPosition {
    /// Top
    North,
    /// Top right
    NorthEast,
    /// Right
    East,
    /// Bottom right
    SouthEast,
    /// Bottom
    South,
    /// Bottom left
    SouthWest,
    /// Left
    West,
    /// Top left
    NorthWest,
    /// Centre
    Center,
}

impl OverlayPosition {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayPosition::North => "N",
            OverlayPosition::NorthEast => "NE",
            OverlayPosition::East => "E",
            OverlayPosition::SouthEast => "SE",
            OverlayPosition::South => "S",
            OverlayPosition::SouthWest => "SW",
            OverlayPosition::West => "W",
            OverlayPosition::NorthWest => "NW",
            OverlayPosition::Center => "C",
        }
    }
}

impl fmt::Display for OverlayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayPosition {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(OverlayPosition::North),
            "NE" => Ok(OverlayPosition::NorthEast),
            "E" => Ok(OverlayPosition::East),
            "SE" => Ok(OverlayPosition::SouthEast),
            "S" => Ok(OverlayPosition::South),
            "SW" => Ok(OverlayPosition::SouthWest),
            "W" => Ok(OverlayPosition::West),
            "NW" => Ok(OverlayPosition::NorthWest),
            "C" => Ok(OverlayPosition::Center),
            _ => Err(ProtocolError::invalid("overlay position", s)),
        }
    }
}

/// How the client renders the referenced property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayType {
    /// Property value is an image name or URL
    Image,
    /// Property value is a colour, e.g. `#45e06f`
    Colour,
    /// Property value is shown as text
    Text,
}

impl OverlayType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayType::Image => "image",
            OverlayType::Colour => "colour",
            OverlayType::Text => "text",
        }
    }
}

impl fmt::Display for OverlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(OverlayType::Image),
            "colour" | "color" => Ok(OverlayType::Colour),
            "text" => Ok(OverlayType::Text),
            _ => Err(ProtocolError::invalid("overlay type", s)),
        }
    }
}

/// An overlay attached to an entity.
///
/// `property_name` normally references one of the entity's properties; the
/// client resolves the value. A literal value (such as a colour) also works
/// but is shadowed by any property of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Property reference (or literal value)
    pub property_name: String,
    /// Where on the icon to draw it
    pub position: OverlayPosition,
    /// How to render it
    pub overlay_type: OverlayType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_round_trip() {
        for position in [
            OverlayPosition::North,
            OverlayPosition::NorthEast,
            OverlayPosition::East,
            OverlayPosition::SouthEast,
            OverlayPosition::South,
            OverlayPosition::SouthWest,
            OverlayPosition::West,
            OverlayPosition::NorthWest,
            OverlayPosition::Center,
        ] {
            assert_eq!(position.as_str().parse::<OverlayPosition>().unwrap(), position);
        }
    }

    #[test]
    fn test_position_case_insensitive() {
        assert_eq!("nw".parse::<OverlayPosition>().unwrap(), OverlayPosition::NorthWest);
    }

    #[test]
    fn test_unknown_position_rejected() {
        let result = "NNE".parse::<OverlayPosition>();
        assert!(matches!(result, Err(ProtocolError::InvalidValue { .. })));
    }

    #[test]
    fn test_overlay_type_parse() {
        assert_eq!("colour".parse::<OverlayType>().unwrap(), OverlayType::Colour);
        assert_eq!("Color".parse::<OverlayType>().unwrap(), OverlayType::Colour);
        assert_eq!("IMAGE".parse::<OverlayType>().unwrap(), OverlayType::Image);
        assert!("icon".parse::<OverlayType>().is_err());
    }
}
