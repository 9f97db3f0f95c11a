//! Extruded text geometry built from glyph metrics.

use text3d_core::{BoundingBox, GeometryParams, Style, Vec3};
use text3d_scene::{GlyphBox, TextGeometry};

use crate::font::GlyphSource;

/// Lay out `text` along the baseline and extrude it to `params.depth`.
///
/// Glyphs without ink (spaces) advance the pen but add no box. With bevel
/// enabled, the bounds grow by the bevel size in x/y and by the bevel
/// thickness on both z faces.
pub fn build_text_geometry(
    text: &str,
    style: Style,
    font: &dyn GlyphSource,
    params: &GeometryParams,
) -> TextGeometry {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut bounds = BoundingBox::empty();
    let mut pen_x = 0.0f32;

    for ch in text.chars() {
        let m = font.metrics(ch, params.size);
        if m.width > 0.0 && m.height > 0.0 {
            let glyph = GlyphBox {
                ch,
                x: pen_x + m.xmin,
                y: m.ymin,
                width: m.width,
                height: m.height,
            };
            bounds.expand_by_point(&Vec3::new(glyph.x, glyph.y, 0.0));
            bounds.expand_by_point(&Vec3::new(
                glyph.x + glyph.width,
                glyph.y + glyph.height,
                params.depth,
            ));
            glyphs.push(glyph);
        }
        pen_x += m.advance_width;
    }

    if params.bevel_enabled && !bounds.is_empty() {
        let grow = params.bevel_size + params.bevel_offset;
        bounds.min = bounds
            .min
            .sub(&Vec3::new(grow, grow, params.bevel_thickness));
        bounds.max = bounds
            .max
            .add(&Vec3::new(grow, grow, params.bevel_thickness));
    }

    TextGeometry {
        text: text.to_string(),
        style,
        params: params.clone(),
        glyphs,
        bounding_box: bounds,
    }
}
