//! Benchmark for the feature extractor.

use arashi::features::create_features;
use arashi::history::History;
use arashi::simulate::simulate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn get_history(items: usize) -> Vec<u8> {
    let history: History = simulate(items, 1).into_iter().collect();
    history.encoded()
}

fn extract_small() {
    let encoded = get_history(1_000);
    black_box(create_features(&encoded, 3).len());
}

fn extract_large() {
    let encoded = get_history(100_000);
    black_box(create_features(&encoded, 8).len());
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("extract 1k results", |b| b.iter(extract_small));
    c.bench_function("extract 100k results", |b| b.iter(extract_large));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
