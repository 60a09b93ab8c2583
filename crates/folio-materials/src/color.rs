//! Normalized RGB colors parsed from designer-facing hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not `#rgb` or `#rrggbb` hexadecimal.
    #[error("malformed color {0:?}, expected #rgb or #rrggbb")]
    Malformed(String),
}

/// Linear RGB color with components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a color from normalized components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parses `#rrggbb` or the short `#rgb` form. The leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let malformed = || ColorError::Malformed(input.to_string());
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| malformed());
        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // #abc is shorthand for #aabbcc
            3 => Ok(Self::from_rgb8(
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            )),
            _ => Err(malformed()),
        }
    }

    /// Quantizes each channel as `round(channel * 255)`, clamped to `u8`.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Components as an array, for uniform uploads.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
