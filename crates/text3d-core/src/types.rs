use serde::{Deserialize, Serialize};
use std::fmt;

/// Typeface style selected by `*` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    #[default]
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl Style {
    /// Style for a run of 1 to 3 asterisks.
    pub fn from_marker_len(count: usize) -> Option<Style> {
        match count {
            1 => Some(Style::Italic),
            2 => Some(Style::Bold),
            3 => Some(Style::BoldItalic),
            _ => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Regular => write!(f, "REGULAR"),
            Style::Italic => write!(f, "ITALIC"),
            Style::Bold => write!(f, "BOLD"),
            Style::BoldItalic => write!(f, "BOLD_ITALIC"),
        }
    }
}

/// Parameters for extruded glyph geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Glyph size in scene units.
    pub size: f32,
    /// Extrusion depth along +z.
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            size: 100.0,
            depth: 50.0,
            curve_segments: 12,
            bevel_enabled: false,
            bevel_thickness: 10.0,
            bevel_size: 8.0,
            bevel_offset: 0.0,
            bevel_segments: 3,
        }
    }
}

impl GeometryParams {
    /// Stable textual form, used as part of geometry cache keys.
    pub fn cache_fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
