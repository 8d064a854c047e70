use thiserror::Error;

pub type Result<T> = std::result::Result<T, LabError>;

/// Errors surfaced to the lab user.
///
/// Every interaction is independently recoverable: an error aborts the
/// current recomputation and leaves the page usable, so these messages are
/// written to be shown directly next to the offending control.
#[derive(Debug, Error)]
pub enum LabError {
    /// Pointwise operations require operands from the same time grid.
    #[error("signals have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// Correlation normalization divides by the signal variance.
    #[error("signal is constant (zero variance); correlation is undefined")]
    DegenerateSignal,

    /// Cutoff must sit strictly inside (0, Nyquist).
    #[error("cutoff {cutoff_hz} Hz is outside (0, {nyquist_hz} Hz); lower the cutoff or raise the sample rate")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },

    /// Band-pass edges must satisfy 0 < low < high < Nyquist.
    #[error("band edges ({low_hz} Hz, {high_hz} Hz) are invalid; need 0 < low < high < {nyquist_hz} Hz")]
    InvalidBand {
        low_hz: f64,
        high_hz: f64,
        nyquist_hz: f64,
    },

    #[error("filter order must be at least 1")]
    InvalidOrder,

    /// Resampling target rate must be positive.
    #[error("target sample rate {rate_hz} Hz is not positive")]
    InvalidRate { rate_hz: f64 },

    #[error("signal is empty")]
    EmptySignal,

    /// Signal too short for the requested operation (e.g. filtfilt padding).
    #[error("signal has {len} samples but the operation needs at least {needed}")]
    SignalTooShort { len: usize, needed: usize },

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unsupported media file (WAV / MAT record).
    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },
}
