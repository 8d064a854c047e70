pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod lab; // De-duplicated demo-page pipelines
pub mod signal; // Synthesis, arithmetic, correlation, resampling
pub mod spectrum;

pub use error::{LabError, Result};
