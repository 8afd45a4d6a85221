//! Color table: color names used in field descriptions and their
//! drawable RGB values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::LayoutError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Outlines and the non-entry parking-zone edges.
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    /// Canvas background.
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);

    /// Build a color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self(r, g, b)
    }

    /// CSS hex notation, e.g. `#00aa00`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A named field color.
///
/// Boxes and cubes share this palette. Every field paints its five boxes
/// with five distinct colors, so each color names exactly one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Orange,
    Red,
    Yellow,
}

impl Color {
    /// All colors in table order.
    pub const ALL: [Self; 5] = [
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Red,
        Self::Yellow,
    ];

    /// Name as written in field descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Orange => "Orange",
            Self::Red => "Red",
            Self::Yellow => "Yellow",
        }
    }

    /// Drawable value.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Blue => Rgb::from_hex(0x0000ff),
            Self::Green => Rgb::from_hex(0x00aa00),
            Self::Orange => Rgb::from_hex(0xff8c00),
            Self::Red => Rgb::from_hex(0xff0000),
            Self::Yellow => Rgb::from_hex(0xffdd00),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| LayoutError::UnknownColor(s.to_owned()))
    }
}
