//! Renderer resources referenced by scene nodes.
//!
//! These are shared behind `Arc` so a cache hit hands out the same object
//! rather than a rebuilt copy.

use serde::Serialize;
use text3d_core::{BoundingBox, Color, GeometryParams, Style};

/// One laid-out glyph inside a [`TextGeometry`], in geometry space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphBox {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Extruded glyph geometry for one trimmed run of text.
#[derive(Debug, Clone, Serialize)]
pub struct TextGeometry {
    pub text: String,
    pub style: Style,
    pub params: GeometryParams,
    pub glyphs: Vec<GlyphBox>,
    pub bounding_box: BoundingBox,
}

impl TextGeometry {
    /// Horizontal extent of the geometry.
    pub fn width(&self) -> f32 {
        self.bounding_box.size().x
    }
}

/// An unlit, flat-colored material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Material {
    pub color: Color,
}

/// Front-face and side-face materials for extruded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialPair {
    pub front: Material,
    pub side: Material,
}

impl MaterialPair {
    /// Pair for a front color, shading the sides for depth.
    pub fn for_color(color: Color) -> Self {
        Self {
            front: Material { color },
            side: Material {
                color: color.side_shade(),
            },
        }
    }
}

/// A decoded emote image.
#[derive(Debug, Clone, Serialize)]
pub struct Texture {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub pixels: image::RgbaImage,
}

impl Texture {
    pub fn new(url: impl Into<String>, pixels: image::RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            url: url.into(),
            width,
            height,
            pixels,
        }
    }

    /// Width over height; 1.0 for a degenerate image.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 || self.width == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Material for a camera-facing sprite: a flat color or a texture.
#[derive(Debug, Clone, Serialize)]
pub struct SpriteMaterial {
    pub color: Color,
    pub texture: Option<std::sync::Arc<Texture>>,
}

impl SpriteMaterial {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            texture: None,
        }
    }

    pub fn textured(texture: std::sync::Arc<Texture>) -> Self {
        Self {
            color: Color::WHITE,
            texture: Some(texture),
        }
    }
}
