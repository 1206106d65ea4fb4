//! Benchmark for training the forest and evaluating a session.

use arashi::features::create_features;
use arashi::history::History;
use arashi::models::{Classifier, RandomForest};
use arashi::predictor::Predictor;
use arashi::simulate::simulate;
use arashi::Context;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn fit_forest(n: usize) {
    let history: History = simulate(n, 11).into_iter().collect();
    let data = create_features(&history.encoded(), 3);
    let mut forest = RandomForest::new(200, 42);
    forest.fit(&data);
    black_box(forest.predict_proba(&[0.0, 1.0, 1.0, 2.0 / 3.0, 2.0, 0.5]));
}

fn fit_small_forest() {
    fit_forest(50);
}

fn fit_large_forest() {
    fit_forest(1_000);
}

/// A fresh predictor for every call, so every evaluation retrains.
fn evaluate_session() {
    let history: History = simulate(200, 5).into_iter().collect();
    let mut predictor = Predictor::new();
    black_box(predictor.evaluate(&history, &Context::default()));
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("fit 200 trees on 50 results", |b| {
        b.iter(fit_small_forest)
    });
    c.bench_function("fit 200 trees on 1000 results", |b| {
        b.iter(fit_large_forest)
    });
    c.bench_function("evaluate session", |b| b.iter(evaluate_session));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
