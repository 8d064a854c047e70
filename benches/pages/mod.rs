//! Full page pipelines, benchmarked exactly as the TUI invokes them.

use std::hint::black_box;

use criterion::Criterion;
use siglab_dsp::lab::{autocorrelation, even_odd, operations};

pub fn bench_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pages");

    let ops = operations::OperationsParams::default();
    group.bench_function("operations", |b| {
        b.iter(|| operations::run(black_box(&ops)))
    });

    group.bench_function("even_odd", |b| {
        b.iter(|| even_odd::run(black_box(even_odd::SourceSignal::Piecewise)))
    });

    let auto = autocorrelation::AutocorrelationParams::default();
    group.bench_function("autocorrelation", |b| {
        b.iter(|| autocorrelation::run(black_box(&auto)))
    });

    group.finish();
}
