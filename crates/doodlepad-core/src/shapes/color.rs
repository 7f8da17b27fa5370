//! Serializable ink color.

use peniko::Color;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("expected 6 or 8 hex digits: {0}")]
    BadLength(String),
    #[error("invalid hex digit in {0}")]
    BadDigit(String),
}

/// An 8-bit RGBA color stored on scene entries.
///
/// Serializes as `{r, g, b, a}`; also deserializes from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GOLD: Self = Self::rgb(255, 215, 0);
    pub const SADDLE_BROWN: Self = Self::rgb(139, 69, 19);
    pub const DEEP_PINK: Self = Self::rgb(255, 20, 147);
    pub const HOT_PINK: Self = Self::rgb(255, 105, 180);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. Case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_string()))?;
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(ColorParseError::BadLength(hex.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(hex.to_string()))
        };
        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// Uppercase hex; the alpha pair is only written when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl<'de> Deserialize<'de> for InkColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Rgba {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(hex) => InkColor::from_hex(&hex).map_err(D::Error::custom),
            Repr::Rgba { r, g, b, a } => Ok(InkColor::new(r, g, b, a)),
        }
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for InkColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Color> for InkColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<InkColor> for Color {
    fn from(color: InkColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_hex() {
        assert_eq!(InkColor::from_hex("#FF1493").unwrap(), InkColor::DEEP_PINK);
        assert_eq!(InkColor::from_hex("#ffd700").unwrap(), InkColor::GOLD);
    }

    #[test]
    fn test_parse_rgba_hex() {
        let c = InkColor::from_hex("#10203040").unwrap();
        assert_eq!(c, InkColor::new(0x10, 0x20, 0x30, 0x40));
        assert_eq!(c.to_hex(), "#10203040");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            InkColor::from_hex("FF0000"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            InkColor::from_hex("#FFF"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            InkColor::from_hex("#GG0000"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = InkColor::SADDLE_BROWN.into();
        assert_eq!(InkColor::from(color), InkColor::SADDLE_BROWN);
    }

    #[test]
    fn test_deserialize_either_form() {
        let c: InkColor = serde_json::from_str(r#"{"r":1,"g":2,"b":3,"a":4}"#).unwrap();
        assert_eq!(c, InkColor::new(1, 2, 3, 4));
        let c: InkColor = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(c, InkColor::rgb(1, 2, 3));
        let c: InkColor = serde_json::from_str(r##""#FF69B4""##).unwrap();
        assert_eq!(c, InkColor::HOT_PINK);
        assert!(serde_json::from_str::<InkColor>(r#""pink""#).is_err());
    }

    #[test]
    fn test_serializes_as_struct() {
        let json = serde_json::to_string(&InkColor::RED).unwrap();
        assert_eq!(json, r#"{"r":255,"g":0,"b":0,"a":255}"#);
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(InkColor::rgb(0xab, 0xcd, 0xef).to_string(), "#ABCDEF");
    }
}
