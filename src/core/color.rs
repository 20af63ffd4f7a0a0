//! RGBA display colors
//!
//! Colors are parsed from CSS names or hex notation so palettes can be kept in
//! JSON config files, and rendered back as hex for canvas backends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Simple RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unknown color name `{0}`")]
    UnknownName(String),
    #[error("malformed hex color `{0}`")]
    MalformedHex(String),
}

/// CSS names understood by [`Color::from_str`], lowercase
const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("antiquewhite", Color::rgb(250, 235, 215)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("coral", Color::rgb(255, 127, 80)),
    ("pink", Color::rgb(255, 192, 203)),
    ("goldenrod", Color::rgb(218, 165, 32)),
    ("khaki", Color::rgb(240, 230, 140)),
    ("lightslategray", Color::rgb(119, 136, 153)),
    ("mediumseagreen", Color::rgb(60, 179, 113)),
    ("olive", Color::rgb(128, 128, 0)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gray", Color::rgb(128, 128, 128)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// Create from an unsigned 32 representing RRGGBBAA
    pub const fn from_u32(num: u32) -> Color {
        Color {
            r: (num >> 24) as u8,
            g: (num >> 16) as u8,
            b: (num >> 8) as u8,
            a: num as u8,
        }
    }

    /// Default ball palette
    pub fn default_palette() -> Vec<Color> {
        [
            "Orange",
            "AntiqueWhite",
            "Aqua",
            "Coral",
            "Pink",
            "GoldenRod",
            "Khaki",
            "LightSlateGray",
            "MediumSeaGreen",
            "Olive",
        ]
        .iter()
        .filter_map(|name| name.parse().ok())
        .collect()
    }

    fn parse_hex(hex: &str, original: &str) -> Result<Color, ColorError> {
        let malformed = || ColorError::MalformedHex(original.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| malformed())?;
        match hex.len() {
            6 => Ok(Color::from_u32((value << 8) | 0xff)),
            8 => Ok(Color::from_u32(value)),
            _ => Err(malformed()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Color::parse_hex(hex, s);
        }
        let lower = trimmed.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
