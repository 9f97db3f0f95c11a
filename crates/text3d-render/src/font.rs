//! Glyph sources and per-style font selection.
//! Uses fontdue for metrics; outlines and rasterization belong to the consumer.

use std::path::Path;
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use text3d_core::{FontConfig, Style, Text3dError, Text3dResult};

/// Metrics of one glyph at a given size, y-up from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub advance_width: f32,
    pub xmin: f32,
    pub ymin: f32,
    pub width: f32,
    pub height: f32,
}

/// Anything that can report glyph metrics.
pub trait GlyphSource: Send + Sync {
    fn name(&self) -> &str;

    fn metrics(&self, ch: char, size: f32) -> GlyphMetrics;
}

/// A TrueType/OpenType face parsed by fontdue.
pub struct FontFace {
    name: String,
    font: Font,
}

impl FontFace {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Text3dResult<Self> {
        let name = name.into();
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| Text3dError::font(format!("failed to parse font: {}", e), &name))?;
        Ok(Self { name, font })
    }

    /// Load a font from a file path.
    pub fn load(path: &Path) -> Text3dResult<Self> {
        let data = std::fs::read(path).map_err(|e| {
            Text3dError::font(format!("failed to read font file: {}", e), path)
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, data)
    }
}

impl GlyphSource for FontFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn metrics(&self, ch: char, size: f32) -> GlyphMetrics {
        let m = self.font.metrics(ch, size);
        GlyphMetrics {
            advance_width: m.advance_width,
            xmin: m.xmin as f32,
            ymin: m.ymin as f32,
            width: m.width as f32,
            height: m.height as f32,
        }
    }
}

/// Regular face plus optional style-specific faces.
#[derive(Clone)]
pub struct FontSet {
    pub regular: Arc<dyn GlyphSource>,
    pub italic: Option<Arc<dyn GlyphSource>>,
    pub bold: Option<Arc<dyn GlyphSource>>,
    pub bold_italic: Option<Arc<dyn GlyphSource>>,
}

impl FontSet {
    pub fn new(regular: Arc<dyn GlyphSource>) -> Self {
        Self {
            regular,
            italic: None,
            bold: None,
            bold_italic: None,
        }
    }

    pub fn with_italic(mut self, face: Arc<dyn GlyphSource>) -> Self {
        self.italic = Some(face);
        self
    }

    pub fn with_bold(mut self, face: Arc<dyn GlyphSource>) -> Self {
        self.bold = Some(face);
        self
    }

    pub fn with_bold_italic(mut self, face: Arc<dyn GlyphSource>) -> Self {
        self.bold_italic = Some(face);
        self
    }

    /// Load every face named in the config. The regular face is required.
    pub fn from_config(config: &FontConfig) -> Text3dResult<Self> {
        let regular = config.regular.as_deref().ok_or_else(|| {
            Text3dError::Config("fonts.regular must point at a font file".to_string())
        })?;
        let load = |path: &Option<std::path::PathBuf>| -> Text3dResult<Option<Arc<dyn GlyphSource>>> {
            match path {
                Some(p) => Ok(Some(Arc::new(FontFace::load(p)?))),
                None => Ok(None),
            }
        };
        Ok(Self {
            regular: Arc::new(FontFace::load(regular)?),
            italic: load(&config.italic)?,
            bold: load(&config.bold)?,
            bold_italic: load(&config.bold_italic)?,
        })
    }

    /// Face for a style. Bold italic falls back through bold, then italic;
    /// everything ends at regular.
    pub fn for_style(&self, style: Style) -> &Arc<dyn GlyphSource> {
        let chosen = match style {
            Style::Regular => None,
            Style::Italic => self.italic.as_ref(),
            Style::Bold => self.bold.as_ref(),
            Style::BoldItalic => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
        };
        chosen.unwrap_or_else(|| {
            if style != Style::Regular {
                tracing::warn!(%style, face = self.regular.name(), "no face for style, using regular");
            }
            &self.regular
        })
    }
}
