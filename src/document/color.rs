//! Text colors as they appear in saved designs.
//!
//! Snapshots carry CSS-style color strings. They are parsed into
//! [`CssColor`] on the way in and always written back as `#rrggbb`
//! (`#rrggbbaa` when not opaque), so a loaded design re-serializes to the
//! same text. Conversion to premultiplied [`Color32`] happens only when a
//! projection is painted.

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unmultiplied sRGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CssColor {
    pub const WHITE: CssColor = CssColor::rgb(0xff, 0xff, 0xff);
    pub const BLACK: CssColor = CssColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    /// Component-wise interpolation, `t` in [0, 1]
    pub fn lerp(self, other: CssColor, t: f32) -> CssColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        CssColor::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for CssColor {
    type Err = ParseColorError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse(input).ok_or_else(|| ParseColorError(input.to_owned()))
    }
}

fn parse(input: &str) -> Option<CssColor> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return None;
        }
        let [r, g, b] = channels(&parts[..3])?;
        let alpha: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        return Some(CssColor::rgba(r, g, b, (alpha * 255.0).round() as u8));
    }
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return None;
        }
        let [r, g, b] = channels(&parts)?;
        return Some(CssColor::rgb(r, g, b));
    }
    None
}

fn channels(parts: &[&str]) -> Option<[u8; 3]> {
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().ok()?;
    }
    Some(out)
}

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(CssColor::rgb(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(CssColor::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CssColor { r, g, b, a } = *self;
        if self.is_opaque() {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Serialize for CssColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<CssColor> {
        s.parse().ok()
    }

    #[test]
    fn parses_hex_notations() {
        assert_eq!(parse("#fff"), Some(CssColor::WHITE));
        assert_eq!(parse("#1d4ed8"), Some(CssColor::rgb(0x1d, 0x4e, 0xd8)));
        assert_eq!(parse("#00000080"), Some(CssColor::rgba(0, 0, 0, 0x80)));
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(parse("rgb(10, 20, 30)"), Some(CssColor::rgb(10, 20, 30)));
        assert_eq!(parse("RGBA(0,0,0,0.5)"), Some(CssColor::rgba(0, 0, 0, 128)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("blue"), None);
        assert_eq!(parse("#12345"), None);
        assert_eq!(parse("#gggggg"), None);
        assert_eq!(parse("rgb(300, 0, 0)"), None);
        assert_eq!(parse("rgba(0, 0, 0, 2)"), None);
    }

    #[test]
    fn formats_back_to_canonical_hex() {
        assert_eq!(CssColor::rgb(0x67, 0xe8, 0xf9).to_string(), "#67e8f9");
        let translucent = CssColor::rgba(12, 34, 56, 0x80);
        assert_eq!(translucent.to_string(), "#0c223880");
        assert_eq!(parse(&translucent.to_string()), Some(translucent));
    }

    #[test]
    fn lerp_hits_both_ends() {
        let a = CssColor::BLACK;
        let b = CssColor::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), CssColor::rgb(128, 128, 128));
    }
}
