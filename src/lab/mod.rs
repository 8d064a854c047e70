// Purpose - one pure pipeline per demo page, parameters in, plot series out

//! Lab page pipelines.
//!
//! Each submodule is the computational core of one demo page: a parameter
//! struct, a `run` function, and an output struct of plot-ready series.
//! Nothing here touches the terminal; the `siglab` binary owns all
//! presentation. Every interaction recomputes its page from scratch, so
//! none of these pipelines hold state between calls.

pub mod autocorrelation;
pub mod cross_correlation;
pub mod even_odd;
pub mod lti;
pub mod operations;
pub mod qrs;
pub mod sampling;

/// Zip a time axis with sample values for charting.
pub(crate) fn series(time: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    time.iter().zip(values.iter()).map(|(&t, &v)| (t, v)).collect()
}
