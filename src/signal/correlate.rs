use crate::error::{LabError, Result};

/*
Correlation Engine
==================

Full (all-lags) discrete correlation of mean-centered signals, normalized so
the result reads as a similarity score:

  autocorrelation:    r[L] = Σ x̃[n+L]·x̃[n] / (N · var(x))    → r[0] = 1
  cross-correlation:  r[L] = Σ x̃[n+L]·ỹ[n] / (N · σx · σy)

where x̃ = x - mean(x), L runs from -(N-1) to (N-1), and var/σ are the
population statistics (divide by N, not N-1). A constant signal has zero
variance and no defined correlation; we reject it instead of dividing by
zero.

The O(N²) direct sum mirrors np.correlate(..., mode='full'); at lab sizes
(N ≈ 1000, one recompute per keypress) there is nothing to gain from an
FFT-based product.
*/

/// All-lags correlation with its lag axis.
#[derive(Debug, Clone)]
pub struct CorrelationResult {
    /// Lags from -(N-1) to (N-1), one per value.
    pub lags: Vec<i64>,
    pub values: Vec<f64>,
}

impl CorrelationResult {
    /// (lag, value) pairs ready for charting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.lags
            .iter()
            .zip(self.values.iter())
            .map(|(&l, &v)| (l as f64, v))
            .collect()
    }

    /// Value at lag 0.
    pub fn at_zero(&self) -> f64 {
        self.values[self.values.len() / 2]
    }
}

/// Normalized autocorrelation of `x`.
pub fn autocorrelation(x: &[f64]) -> Result<CorrelationResult> {
    if x.is_empty() {
        return Err(LabError::EmptySignal);
    }

    let n = x.len() as f64;
    let centered = center(x);
    let var = centered.iter().map(|&v| v * v).sum::<f64>() / n;
    if var == 0.0 {
        return Err(LabError::DegenerateSignal);
    }

    let raw = correlate_full(&centered, &centered);
    finish(raw, x.len(), n * var)
}

/// Normalized cross-correlation of two equal-length signals.
pub fn cross_correlation(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    if x.len() != y.len() {
        return Err(LabError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(LabError::EmptySignal);
    }

    let n = x.len() as f64;
    let xc = center(x);
    let yc = center(y);
    let std_x = (xc.iter().map(|&v| v * v).sum::<f64>() / n).sqrt();
    let std_y = (yc.iter().map(|&v| v * v).sum::<f64>() / n).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return Err(LabError::DegenerateSignal);
    }

    let raw = correlate_full(&xc, &yc);
    finish(raw, x.len(), n * std_x * std_y)
}

/// Pearson correlation coefficient between two equal-length signals.
///
/// Used by the QRS page to score how well the filtered cycle matches the
/// clean one (np.corrcoef equivalent).
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(LabError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(LabError::EmptySignal);
    }

    let xc = center(x);
    let yc = center(y);
    let sxx: f64 = xc.iter().map(|&v| v * v).sum();
    let syy: f64 = yc.iter().map(|&v| v * v).sum();
    if sxx == 0.0 || syy == 0.0 {
        return Err(LabError::DegenerateSignal);
    }
    let sxy: f64 = xc.iter().zip(yc.iter()).map(|(&a, &b)| a * b).sum();

    Ok(sxy / (sxx * syy).sqrt())
}

/// Raw full correlation: out[L + N - 1] = Σ x[n+L]·y[n].
///
/// Equivalent to np.correlate(x, y, mode='full') for equal-length real
/// inputs. Output length is 2N - 1.
pub fn correlate_full(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    debug_assert_eq!(n, y.len());

    let mut out = Vec::with_capacity(2 * n - 1);
    for lag in -(n as i64 - 1)..=(n as i64 - 1) {
        let mut acc = 0.0;
        for m in 0..n {
            let i = m as i64 + lag;
            if (0..n as i64).contains(&i) {
                acc += x[i as usize] * y[m];
            }
        }
        out.push(acc);
    }
    out
}

fn center(x: &[f64]) -> Vec<f64> {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    x.iter().map(|&v| v - mean).collect()
}

fn finish(raw: Vec<f64>, n: usize, norm: f64) -> Result<CorrelationResult> {
    let lags: Vec<i64> = (-(n as i64 - 1)..=(n as i64 - 1)).collect();
    let values = raw.into_iter().map(|v| v / norm).collect();
    Ok(CorrelationResult { lags, values })
}
