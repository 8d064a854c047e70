//! Benchmarks for the O(N^2) correlation engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use siglab_dsp::signal::correlate::{autocorrelation, cross_correlation};
use siglab_dsp::signal::grid::TimeGrid;
use siglab_dsp::signal::synth::{gaussian_noise, synthesize, WaveParams, Waveform};

use crate::SIGNAL_LENS;

pub fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/correlate");

    for &len in SIGNAL_LENS {
        let grid = TimeGrid::from_rate(0.0, 1000.0, len);
        let clean = synthesize(&WaveParams::new(1.0, 5.0, 0.0, Waveform::Sine), &grid);
        let noise = gaussian_noise(len, 0.5, 1);
        let noisy: Vec<f64> = clean.iter().zip(noise.iter()).map(|(&s, &n)| s + n).collect();

        group.bench_with_input(BenchmarkId::new("auto", len), &len, |b, _| {
            b.iter(|| autocorrelation(black_box(&clean)))
        });

        group.bench_with_input(BenchmarkId::new("cross", len), &len, |b, _| {
            b.iter(|| cross_correlation(black_box(&clean), black_box(&noisy)))
        });
    }

    group.finish();
}
