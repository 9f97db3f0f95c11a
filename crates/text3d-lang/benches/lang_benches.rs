use criterion::{black_box, criterion_group, criterion_main, Criterion};
use text3d_lang::{parse, tokenize};

const CHAT_LINE: &str =
    "\x1b[36mviewer42\x1b[0m: **GG** that was *clean* :25: :25: \x1b[33mhype :1902: train\x1b[0m";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_chat_line", |b| {
        b.iter(|| tokenize(black_box(CHAT_LINE)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let long = CHAT_LINE.repeat(32);
    c.bench_function("tokenize_and_parse_long_line", |b| {
        b.iter(|| parse(tokenize(black_box(&long))))
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
