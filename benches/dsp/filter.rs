//! Benchmarks for Butterworth design and application.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use siglab_dsp::filter::FilterSpec;
use siglab_dsp::signal::synth::white_noise;

use crate::SIGNAL_LENS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let fs = 8000.0;

    // Design alone is cheap but runs on every parameter change
    group.bench_function("design/order6", |b| {
        let spec = FilterSpec::lowpass(300.0, 6, fs);
        b.iter(|| black_box(&spec).design())
    });

    for &len in SIGNAL_LENS {
        let x = white_noise(len, 1.0, 3);

        for (name, spec) in [
            ("lowpass", FilterSpec::lowpass(300.0, 4, fs)),
            ("highpass", FilterSpec::highpass(300.0, 4, fs)),
            ("bandpass", FilterSpec::bandpass(200.0, 1200.0, 4, fs)),
        ] {
            let sos = spec.design().expect("valid design");

            group.bench_with_input(
                BenchmarkId::new(format!("{name}/single"), len),
                &len,
                |b, _| b.iter(|| sos.filter(black_box(&x))),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("{name}/filtfilt"), len),
                &len,
                |b, _| b.iter(|| sos.filtfilt(black_box(&x))),
            );
        }
    }

    group.finish();
}
