//! Color primitives
//!
//! Everything downstream of the palette resolves to [`Rgba`]: four 8-bit
//! channels parsed from `#rrggbb` or `#rrggbbaa` hex literals. Colors
//! serialize back to the same hex form so documents stay diffable.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// Errors produced when parsing a hex color literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Literal does not start with `#`
    #[error("color {0:?} is missing the leading '#'")]
    MissingHash(String),

    /// Literal has the wrong number of hex digits
    #[error("color {0:?} has {1} hex digits, expected 6 or 8")]
    BadLength(String, usize),

    /// Literal contains a non-hex character
    #[error("color {0:?} contains an invalid hex digit")]
    BadDigit(String),
}

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` literal
    pub fn parse_hex(s: &str) -> Result<Self, ParseColorError> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(ParseColorError::MissingHash(s.to_string()));
        };

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ParseColorError::BadLength(s.to_string(), digits.len()));
        }
        if !digits.is_ascii() {
            return Err(ParseColorError::BadDigit(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParseColorError::BadDigit(s.to_string()))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 0xff };

        Ok(Self { r, g, b, a })
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Replace the alpha channel
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    /// Composite `self` over an opaque `base` (straight alpha)
    ///
    /// The base's own alpha is ignored; the result is fully opaque.
    pub fn over(self, base: Rgba) -> Rgba {
        if self.is_opaque() {
            return self.with_alpha(0xff);
        }

        let alpha = f32::from(self.a) / 255.0;
        let blend = |fg: u8, bg: u8| {
            let out = f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha);
            out.round().clamp(0.0, 255.0) as u8
        };

        Rgba::opaque(
            blend(self.r, base.r),
            blend(self.g, base.g),
            blend(self.b, base.b),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse_hex(&s).map_err(de::Error::custom)
    }
}
