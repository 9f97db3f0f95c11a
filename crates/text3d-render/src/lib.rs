//! # text3d-render
//!
//! Turns parsed overlay markup into a positioned scene graph.
//!
//! - **font**: glyph metrics per style
//! - **geometry**: extruded text blocks
//! - **cache**: memoized geometry, materials and textures
//! - **texture**: async emote image loading
//! - **generator**: layout, emote placeholders and deferred texture swaps

pub mod cache;
pub mod font;
pub mod generator;
pub mod geometry;
pub mod texture;

pub use cache::{CacheCounters, CacheStats, DisposeReport, GeometryKey, ResourceCache};
pub use font::{FontFace, FontSet, GlyphMetrics, GlyphSource};
pub use generator::{Generator, GeneratorOptions, RenderedText, TextureLoad, TextureOutcome};
pub use geometry::build_text_geometry;
pub use texture::{decode_texture, HttpTextureLoader, OfflineTextureLoader, TextureLoader};

/// Run one full pass: dispose the previous pass's resources, then
/// tokenize, parse and generate `markup`.
///
/// Fetches still in flight from earlier passes are cancelled, and any that
/// already finished are discarded when applied.
pub fn compile(markup: &str, generator: &Generator, cache: &mut ResourceCache) -> RenderedText {
    let disposed = cache.cleanup();
    tracing::debug!(?disposed, "starting compile pass");

    let tokens = text3d_lang::tokenize(markup);
    tracing::trace!(tokens = tokens.len(), "tokenized markup");
    let ast = text3d_lang::parse(tokens);
    generator.generate(&ast, cache)
}
