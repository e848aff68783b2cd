//! Color values as reported by swatches and color pickers.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Empty color string")]
    Empty,
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
    #[error("Invalid rgb() color: {0}")]
    InvalidFunction(String),
    #[error("Unsupported color format: {0}")]
    Unsupported(String),
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as a CSS hex string so configuration files and replay
/// scripts can write `"#ff0000"` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Check whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for Rgba8 {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<Rgba8> for Color {
    fn from(color: Rgba8) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Rgba8 {
    type Err = ColorParseError;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_function_args(args)
                .ok_or_else(|| ColorParseError::InvalidFunction(s.to_string()));
        }
        Err(ColorParseError::Unsupported(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Rgba8::opaque(out[0], out[1], out[2]))
        }
        6 => Some(Rgba8::opaque(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

fn parse_function_args(args: &str) -> Option<Rgba8> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |p: &str| p.parse::<f64>().ok().map(|v| v.round().clamp(0.0, 255.0) as u8);
    match parts.as_slice() {
        [r, g, b] => Some(Rgba8::opaque(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            // CSS alpha is a 0..1 fraction
            let alpha = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
            Some(Rgba8::new(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}
