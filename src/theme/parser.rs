//! Color value parsing for the color database

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error type for color parsing failures
#[derive(Debug, thiserror::Error)]
pub enum ColorParseError {
    #[error("Invalid hex color format: {0}")]
    InvalidHex(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

/// A color as it ends up in a stylesheet.
///
/// Named colors keep their name so they round-trip to the same CSS keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssColor {
    Rgba(u8, u8, u8, u8),
    Named(&'static str, (u8, u8, u8)),
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gold", (255, 215, 0)),
    ("silver", (192, 192, 192)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("maroon", (128, 0, 0)),
    ("crimson", (220, 20, 60)),
];

/// Parse a color from various string formats
pub fn parse_color(input: &str) -> Result<CssColor, ColorParseError> {
    let input = input.trim();

    if input.starts_with('#') {
        return parse_hex_color(input);
    }

    parse_named_color(input)
}

fn hex_pair(hex: &str, range: std::ops::Range<usize>) -> Result<u8, ColorParseError> {
    hex.get(range)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))
}

/// Parse hex color in format #RGB, #RRGGBB or #RRGGBBAA
fn parse_hex_color(hex: &str) -> Result<CssColor, ColorParseError> {
    match hex.len() {
        4 => {
            let r = hex_pair(hex, 1..2)?;
            let g = hex_pair(hex, 2..3)?;
            let b = hex_pair(hex, 3..4)?;
            Ok(CssColor::Rgba(r * 17, g * 17, b * 17, 255)) // 17 = 255/15
        }
        7 => Ok(CssColor::Rgba(
            hex_pair(hex, 1..3)?,
            hex_pair(hex, 3..5)?,
            hex_pair(hex, 5..7)?,
            255,
        )),
        9 => Ok(CssColor::Rgba(
            hex_pair(hex, 1..3)?,
            hex_pair(hex, 3..5)?,
            hex_pair(hex, 5..7)?,
            hex_pair(hex, 7..9)?,
        )),
        _ => Err(ColorParseError::InvalidHex(hex.to_string())),
    }
}

/// Parse named color (case-insensitive)
fn parse_named_color(name: &str) -> Result<CssColor, ColorParseError> {
    let lower = name.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|(known, rgb)| CssColor::Named(*known, *rgb))
        .ok_or_else(|| ColorParseError::UnknownName(name.to_string()))
}

impl CssColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match *self {
            CssColor::Rgba(r, g, b, _) => (r, g, b),
            CssColor::Named(_, rgb) => rgb,
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CssColor::Rgba(r, g, b, 255) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            CssColor::Rgba(r, g, b, a) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
            CssColor::Named(name, _) => f.write_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_color(&value).map_err(|e| D::Error::custom(format!("Failed to parse color: {e}")))
    }
}

impl Serialize for CssColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
