//! Benchmarks for waveform synthesis.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use siglab_dsp::signal::grid::TimeGrid;
use siglab_dsp::signal::synth::{synthesize, WaveParams, Waveform};

use crate::SIGNAL_LENS;

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/synth");

    for &len in SIGNAL_LENS {
        let grid = TimeGrid::from_rate(0.0, 1000.0, len);

        for waveform in Waveform::ALL {
            let params = WaveParams::new(1.0, 50.0, 0.3, waveform);
            group.bench_with_input(
                BenchmarkId::new(waveform.label(), len),
                &len,
                |b, _| b.iter(|| synthesize(black_box(&params), black_box(&grid))),
            );
        }
    }

    group.finish();
}
