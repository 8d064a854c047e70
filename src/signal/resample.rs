#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/*
Naive Resampling (Aliasing Demo)
================================

This is deliberately NOT a correct resampler. The sampling-theorem page
wants students to see aliasing, so we decimate by plain index striding with
no anti-alias prefilter:

  1. keep every `stride`-th sample, stride = floor(fs_orig / fs_new)
  2. linearly interpolate the kept samples back onto the original index
     grid (np.interp semantics: clamp to the edge values outside the kept
     range)

When fs_new drops below twice the signal's highest frequency, the
reconstruction visibly (and audibly, in the original lab) folds high
content down into spurious low frequencies. Do not "fix" this by adding a
lowpass before the decimation; losing the artifact defeats the page.
*/

/// Decimate to an effective rate of `fs_new`, then linearly interpolate back
/// to the original length.
pub fn naive_resample(x: &[f64], fs_orig: f64, fs_new: f64) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Err(LabError::EmptySignal);
    }
    if fs_new <= 0.0 {
        return Err(LabError::InvalidRate { rate_hz: fs_new });
    }

    // fs_new above fs_orig keeps every sample (stride 1): nothing to show
    let stride = ((fs_orig / fs_new).floor() as usize).max(1);
    if stride == 1 {
        return Ok(x.to_vec());
    }

    let kept_indices: Vec<usize> = (0..x.len()).step_by(stride).collect();
    Ok(interp_onto_index_grid(x, &kept_indices))
}

/// Linear interpolation of (index, x[index]) pairs back onto 0..len.
fn interp_onto_index_grid(x: &[f64], kept: &[usize]) -> Vec<f64> {
    let n = x.len();
    let mut out = Vec::with_capacity(n);
    let mut seg = 0; // current segment [kept[seg], kept[seg + 1]]

    for i in 0..n {
        while seg + 1 < kept.len() && kept[seg + 1] < i {
            seg += 1;
        }

        let value = if i <= kept[0] {
            x[kept[0]]
        } else if i >= kept[kept.len() - 1] {
            // Clamp past the last kept sample (np.interp edge behavior)
            x[kept[kept.len() - 1]]
        } else {
            let (i0, i1) = (kept[seg], kept[seg + 1]);
            let t = (i - i0) as f64 / (i1 - i0) as f64;
            x[i0] + t * (x[i1] - x[i0])
        };
        out.push(value);
    }

    out
}

/// Default sampling rates derived from the signal's maximum frequency
/// component, as offered by the Nyquist page.
///
/// The original page variants disagreed on the critical rate (f_max in one,
/// 2·f_max in another); we use the Nyquist definition, 2·f_max.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct SamplingRates {
    /// Below Nyquist: aliasing expected.
    pub under_hz: f64,
    /// Exactly 2·f_max.
    pub critical_hz: f64,
    /// Comfortably above Nyquist.
    pub over_hz: f64,
}

impl SamplingRates {
    pub fn from_max_frequency(f_max: f64) -> Self {
        Self {
            under_hz: f_max / 1.5,
            critical_hz: 2.0 * f_max,
            over_hz: 3.0 * f_max,
        }
    }
}
