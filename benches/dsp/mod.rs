//! Low-level primitive benchmarks.

mod correlate;
mod filter;
mod spectrum;
mod synth;

pub use correlate::bench_correlate;
pub use filter::bench_filter;
pub use spectrum::bench_spectrum;
pub use synth::bench_synth;
