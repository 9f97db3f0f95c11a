use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use text3d_lang::{parse, tokenize};
use text3d_render::{
    FontSet, Generator, GeneratorOptions, GlyphMetrics, GlyphSource, OfflineTextureLoader,
    ResourceCache,
};

const CHAT_LINE: &str =
    "\x1b[36mviewer42\x1b[0m **GG** that was *clean* \x1b[33mhype train\x1b[0m ***wow***";

// Metrics only; a real face would add fontdue lookup cost on cache misses.
struct Fixed;

impl GlyphSource for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn metrics(&self, _ch: char, size: f32) -> GlyphMetrics {
        GlyphMetrics {
            advance_width: size * 0.6,
            xmin: 0.0,
            ymin: 0.0,
            width: size * 0.5,
            height: size * 0.7,
        }
    }
}

fn generator() -> Generator {
    let options = GeneratorOptions::new(FontSet::new(Arc::new(Fixed)));
    Generator::new(options, Arc::new(OfflineTextureLoader))
}

fn bench_generate(c: &mut Criterion) {
    let generator = generator();
    let ast = parse(tokenize(CHAT_LINE));

    c.bench_function("generate_cold_cache", |b| {
        b.iter(|| {
            let mut cache = ResourceCache::new();
            generator.generate(black_box(&ast), &mut cache)
        })
    });

    let mut warm = ResourceCache::new();
    generator.generate(&ast, &mut warm);
    c.bench_function("generate_warm_cache", |b| {
        b.iter(|| generator.generate(black_box(&ast), &mut warm))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
