use serde::{Deserialize, Serialize};
use std::fmt;

/// Average channel intensity at or above which the side face is darkened.
const SHADE_THRESHOLD: u32 = 0x55;
const DARKEN_FACTOR: f64 = 0.7;
const BRIGHTEN_FACTOR: f64 = 3.0;

/// Opaque 24-bit RGB color, the unit materials are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Pack into `0xRRGGBB`.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ColorError::InvalidHex);
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| ColorError::InvalidHex)?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| ColorError::InvalidHex)?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| ColorError::InvalidHex)?;
        Ok(Self::rgb(r, g, b))
    }

    /// Color for the extruded side faces of a glyph.
    ///
    /// Light colors are darkened and dark colors brightened (clamped to
    /// 0xFF per channel) so the depth reads against either kind of front face.
    pub fn side_shade(&self) -> Color {
        let sum = self.r as u32 + self.g as u32 + self.b as u32;
        let average = sum.div_ceil(3);
        let factor = if average >= SHADE_THRESHOLD {
            DARKEN_FACTOR
        } else {
            BRIGHTEN_FACTOR
        };
        let scale = |c: u8| ((c as f64 * factor).floor()).min(255.0) as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    // --- Named constants ---

    pub const WHITE: Color = Color::from_u32(0xffffff);
    pub const BLACK: Color = Color::from_u32(0x000000);
    pub const RED: Color = Color::from_u32(0xff0000);
    pub const GREEN: Color = Color::from_u32(0x00ff00);
    pub const BLUE: Color = Color::from_u32(0x0000ff);
    pub const YELLOW: Color = Color::from_u32(0xffff00);
    pub const MAGENTA: Color = Color::from_u32(0xff00ff);
    pub const CYAN: Color = Color::from_u32(0x00ffff);

    /// Resolve a color name as produced by the markup parser.
    ///
    /// Returns `None` for names outside the palette; callers fall back to white.
    pub fn from_name(name: &str) -> Option<Color> {
        match name {
            "WHITE" => Some(Color::WHITE),
            "RED" => Some(Color::RED),
            "GREEN" => Some(Color::GREEN),
            "BLUE" => Some(Color::BLUE),
            "YELLOW" => Some(Color::YELLOW),
            "MAGENTA" => Some(Color::MAGENTA),
            "CYAN" => Some(Color::CYAN),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF8800").unwrap();
        assert_eq!(c, Color::rgb(255, 136, 0));
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::GREEN);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("invalid").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#FF000080").is_err());
    }

    #[test]
    fn test_packed_round_trip() {
        assert_eq!(Color::from_u32(0x123456).to_u32(), 0x123456);
    }

    #[test]
    fn test_side_shade_darkens_light_colors() {
        assert_eq!(Color::WHITE.side_shade(), Color::rgb(178, 178, 178));
        assert_eq!(Color::RED.side_shade(), Color::rgb(178, 0, 0));
        assert_eq!(Color::YELLOW.side_shade(), Color::rgb(178, 178, 0));
    }

    #[test]
    fn test_side_shade_brightens_dark_colors() {
        assert_eq!(Color::rgb(0x20, 0x10, 0x00).side_shade(), Color::rgb(0x60, 0x30, 0x00));
        // clamped per channel
        assert_eq!(Color::rgb(0x90, 0x00, 0x00).side_shade(), Color::rgb(0xff, 0x00, 0x00));
        assert_eq!(Color::BLACK.side_shade(), Color::BLACK);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Color::from_name("CYAN"), Some(Color::CYAN));
        assert_eq!(Color::from_name("ORANGE"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::RED), "#FF0000");
    }
}
