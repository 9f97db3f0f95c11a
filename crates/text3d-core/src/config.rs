use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Text3dResult;
use crate::math::Vec3;
use crate::types::GeometryParams;

pub const DEFAULT_EMOTE_URL_TEMPLATE: &str =
    "https://static-cdn.jtvnw.net/emoticons/v2/{id}/static/light/3.0";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmoteConfig {
    /// Emote edge length; falls back to the glyph size when unset.
    pub size: Option<f32>,
    /// Number of z-spaced sprites used to fake extrusion.
    pub depth_segments: u32,
    /// Image URL with `{id}` standing in for the numeric emote id.
    pub url_template: String,
}

impl Default for EmoteConfig {
    fn default() -> Self {
        Self {
            size: None,
            depth_segments: 25,
            url_template: DEFAULT_EMOTE_URL_TEMPLATE.to_string(),
        }
    }
}

impl EmoteConfig {
    pub fn url_for(&self, emote_id: &str) -> String {
        self.url_template.replace("{id}", emote_id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one whitespace character as a fraction of glyph size.
    pub spacing_ratio: f32,
    /// Minimum gap around each run, as a fraction of the spacing.
    pub min_gap_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_ratio: 0.4,
            min_gap_ratio: 0.13,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1000.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Text3dConfig {
    #[serde(default)]
    pub geometry: GeometryParams,
    #[serde(default)]
    pub emotes: EmoteConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

impl Text3dConfig {
    pub fn load_from_file(path: &std::path::Path) -> Text3dResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Text3dConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Text3dResult<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
