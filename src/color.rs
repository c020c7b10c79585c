//! Color values and tolerance matching.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An RGBA color, either sampled from a frame or configured as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse exactly six hex digits (e.g., "FF8000"), case-insensitive.
    /// No "#" prefix, sign, or shorthand forms are accepted.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidHexColor(hex.to_string()));
        }

        let parse = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| Error::InvalidHexColor(hex.to_string()))
        };

        Ok(Self::opaque(
            parse(&hex[0..2])?,
            parse(&hex[2..4])?,
            parse(&hex[4..6])?,
        ))
    }

    /// Unpack from a packed ARGB integer, alpha in the top byte.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Pack into an ARGB integer, alpha in the top byte.
    pub fn to_argb(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Convert to hex string (e.g., "#FF8000"). Alpha is not included.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Check if this color matches another within a per-channel tolerance.
    /// Every channel difference must be strictly below the tolerance, so a
    /// tolerance of 0 matches nothing. Alpha is ignored.
    pub fn matches(&self, other: &Color, tolerance: u8) -> bool {
        let dr = (self.r as i16 - other.r as i16).abs();
        let dg = (self.g as i16 - other.g as i16).abs();
        let db = (self.b as i16 - other.b as i16).abs();
        dr < tolerance as i16 && dg < tolerance as i16 && db < tolerance as i16
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
