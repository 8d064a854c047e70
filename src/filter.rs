use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/*
Butterworth Design and Zero-Phase Application
=============================================

Design path (the classic analog-to-digital route):

  1. Analog lowpass prototype: poles evenly spaced on the left half of the
     unit circle, s_k = exp(jπ(2k + n + 1) / 2n). Butterworth = maximally
     flat passband; the pole angles are all the design freedom there is.
  2. Prewarp the cutoff so the analog edge lands on the requested digital
     frequency after the bilinear transform: ωa = 2·tan(π·fc / fs).
  3. Frequency-scale the prototype (lowpass) or invert it (s → ωa/s for
     highpass), one biquad per conjugate pole pair plus a first-order
     section when the order is odd.
  4. Bilinear transform each section, s = 2(1 - z⁻¹)/(1 + z⁻¹), directly
     into digital biquad coefficients.

Band-pass is a series composition, LP(high edge) ∘ HP(low edge):

  | type      | constructed by     | passes          | rejects |
  | --------- | ------------------ | --------------- | ------- |
  | low-pass  | LP                 | below cutoff    | above   |
  | high-pass | HP                 | above cutoff    | below   |
  | band-pass | LP ∘ HP (series)   | between cutoffs | outside |

Keeping everything as a cascade of second-order sections avoids the
numerical blow-up of expanded high-order polynomials.

Zero-phase application (filtfilt): run the cascade forward, reverse, run it
again, reverse. Phase shifts cancel; the magnitude response applies twice.
Edges get odd-extension padding so the filter has settled before it reaches
the real samples.
*/

/// Closed set of filter responses offered by the lab.
///
/// Replaces the original's string-keyed branches; the band edges travel
/// with the variant so an incomplete spec cannot be expressed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    LowPass { cutoff_hz: f64 },
    HighPass { cutoff_hz: f64 },
    BandPass { low_hz: f64, high_hz: f64 },
}

impl FilterKind {
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::LowPass { .. } => "Low-pass",
            FilterKind::HighPass { .. } => "High-pass",
            FilterKind::BandPass { .. } => "Band-pass",
        }
    }
}

/// A complete filter request: response shape, order, and the sample rate of
/// the signal it will run against. Built fresh from widget values on every
/// interaction; never persisted.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub order: usize,
    pub sample_rate_hz: f64,
}

impl FilterSpec {
    pub fn lowpass(cutoff_hz: f64, order: usize, sample_rate_hz: f64) -> Self {
        Self {
            kind: FilterKind::LowPass { cutoff_hz },
            order,
            sample_rate_hz,
        }
    }

    pub fn highpass(cutoff_hz: f64, order: usize, sample_rate_hz: f64) -> Self {
        Self {
            kind: FilterKind::HighPass { cutoff_hz },
            order,
            sample_rate_hz,
        }
    }

    pub fn bandpass(low_hz: f64, high_hz: f64, order: usize, sample_rate_hz: f64) -> Self {
        Self {
            kind: FilterKind::BandPass { low_hz, high_hz },
            order,
            sample_rate_hz,
        }
    }

    /// Validate and design the Butterworth cascade.
    pub fn design(&self) -> Result<Sos> {
        let nyquist = self.sample_rate_hz / 2.0;
        if self.order == 0 {
            return Err(LabError::InvalidOrder);
        }

        let sos = match self.kind {
            FilterKind::LowPass { cutoff_hz } => {
                check_cutoff(cutoff_hz, nyquist)?;
                Sos {
                    sections: lowpass_sections(self.order, cutoff_hz, self.sample_rate_hz),
                }
            }
            FilterKind::HighPass { cutoff_hz } => {
                check_cutoff(cutoff_hz, nyquist)?;
                Sos {
                    sections: highpass_sections(self.order, cutoff_hz, self.sample_rate_hz),
                }
            }
            FilterKind::BandPass { low_hz, high_hz } => {
                if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
                    return Err(LabError::InvalidBand {
                        low_hz,
                        high_hz,
                        nyquist_hz: nyquist,
                    });
                }
                // Series LP(high) ∘ HP(low)
                let mut sections = highpass_sections(self.order, low_hz, self.sample_rate_hz);
                sections.extend(lowpass_sections(self.order, high_hz, self.sample_rate_hz));
                Sos { sections }
            }
        };

        log::debug!(
            "designed {} butterworth: order {}, {} biquad section(s)",
            self.kind.label(),
            self.order,
            sos.sections.len()
        );
        Ok(sos)
    }
}

fn check_cutoff(cutoff_hz: f64, nyquist_hz: f64) -> Result<()> {
    if cutoff_hz <= 0.0 || cutoff_hz >= nyquist_hz {
        return Err(LabError::InvalidCutoff {
            cutoff_hz,
            nyquist_hz,
        });
    }
    Ok(())
}

/// One second-order section, normalized so a0 = 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Biquad {
    /// Run the section over `x` (direct form II transposed), fresh state.
    fn process(&self, x: &[f64]) -> Vec<f64> {
        let mut z1 = 0.0;
        let mut z2 = 0.0;
        x.iter()
            .map(|&input| {
                let output = self.b0 * input + z1;
                z1 = self.b1 * input - self.a1 * output + z2;
                z2 = self.b2 * input - self.a2 * output;
                output
            })
            .collect()
    }
}

/// A designed filter: cascade of second-order sections.
#[derive(Debug, Clone)]
pub struct Sos {
    pub sections: Vec<Biquad>,
}

impl Sos {
    /// Single forward pass through the cascade (introduces phase delay).
    pub fn filter(&self, x: &[f64]) -> Vec<f64> {
        let mut y = x.to_vec();
        for section in &self.sections {
            y = section.process(&y);
        }
        y
    }

    /// Zero-phase forward-backward application.
    ///
    /// Odd-extension padding keeps startup transients off the real samples;
    /// the backward pass cancels the phase response, so the output has no
    /// group delay. The magnitude response applies twice (attenuation in dB
    /// doubles relative to a single pass).
    pub fn filtfilt(&self, x: &[f64]) -> Result<Vec<f64>> {
        let n = x.len();
        let padlen = 3 * (2 * self.sections.len() + 1);
        if n <= padlen {
            return Err(LabError::SignalTooShort {
                len: n,
                needed: padlen + 1,
            });
        }

        // Odd extension: reflect about the endpoint values
        let mut extended = Vec::with_capacity(n + 2 * padlen);
        for i in (1..=padlen).rev() {
            extended.push(2.0 * x[0] - x[i]);
        }
        extended.extend_from_slice(x);
        for i in 1..=padlen {
            extended.push(2.0 * x[n - 1] - x[n - 1 - i]);
        }

        let mut y = self.filter(&extended);
        y.reverse();
        let mut y = self.filter(&y);
        y.reverse();

        Ok(y[padlen..padlen + n].to_vec())
    }
}

/// Prewarped analog cutoff for the bilinear transform (T normalized to 1).
fn prewarp(cutoff_hz: f64, sample_rate_hz: f64) -> f64 {
    2.0 * (PI * cutoff_hz / sample_rate_hz).tan()
}

/// Butterworth prototype pole angles for the conjugate pairs of order `n`.
///
/// Pole k sits at exp(jπ(2k + n + 1) / 2n); iterating k over the first
/// n/2 values covers each conjugate pair once.
fn pair_angles(order: usize) -> impl Iterator<Item = f64> {
    let n = order;
    (0..n / 2).map(move |k| PI * (2 * k + n + 1) as f64 / (2 * n) as f64)
}

fn lowpass_sections(order: usize, cutoff_hz: f64, sample_rate_hz: f64) -> Vec<Biquad> {
    let wa = prewarp(cutoff_hz, sample_rate_hz);
    let mut sections = Vec::with_capacity((order + 1) / 2);

    if order % 2 == 1 {
        // Real pole at s = -ωa: H(s) = ωa / (s + ωa)
        let d0 = wa + 2.0;
        sections.push(Biquad {
            b0: wa / d0,
            b1: wa / d0,
            b2: 0.0,
            a1: (wa - 2.0) / d0,
            a2: 0.0,
        });
    }

    for theta in pair_angles(order) {
        // Scaled pair section: s² + a1s·s + a0s, a1s = -2cosθ·ωa > 0
        let a1s = -2.0 * theta.cos() * wa;
        let a0s = wa * wa;
        let d0 = 4.0 + 2.0 * a1s + a0s;
        sections.push(Biquad {
            b0: a0s / d0,
            b1: 2.0 * a0s / d0,
            b2: a0s / d0,
            a1: (2.0 * a0s - 8.0) / d0,
            a2: (4.0 - 2.0 * a1s + a0s) / d0,
        });
    }

    sections
}

fn highpass_sections(order: usize, cutoff_hz: f64, sample_rate_hz: f64) -> Vec<Biquad> {
    let wa = prewarp(cutoff_hz, sample_rate_hz);
    let mut sections = Vec::with_capacity((order + 1) / 2);

    if order % 2 == 1 {
        // s → ωa/s turns the real-pole section into H(s) = s / (s + ωa)
        let d0 = wa + 2.0;
        sections.push(Biquad {
            b0: 2.0 / d0,
            b1: -2.0 / d0,
            b2: 0.0,
            a1: (wa - 2.0) / d0,
            a2: 0.0,
        });
    }

    for theta in pair_angles(order) {
        // H(s) = s² / (s² + a1s·s + a0s): same denominator as the lowpass
        // section, numerator from the two zeros at s = 0
        let a1s = -2.0 * theta.cos() * wa;
        let a0s = wa * wa;
        let d0 = 4.0 + 2.0 * a1s + a0s;
        sections.push(Biquad {
            b0: 4.0 / d0,
            b1: -8.0 / d0,
            b2: 4.0 / d0,
            a1: (2.0 * a0s - 8.0) / d0,
            a2: (4.0 - 2.0 * a1s + a0s) / d0,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::grid::TimeGrid;
    use crate::signal::synth::{synthesize, WaveParams, Waveform};

    fn tone(freq: f64, fs: f64, len: usize) -> Vec<f64> {
        let grid = TimeGrid::from_rate(0.0, fs, len);
        synthesize(&WaveParams::new(1.0, freq, 0.0, Waveform::Sine), &grid)
    }

    /// RMS over the middle half, away from edge transients.
    fn mid_rms(x: &[f64]) -> f64 {
        let quarter = x.len() / 4;
        let mid = &x[quarter..x.len() - quarter];
        (mid.iter().map(|&v| v * v).sum::<f64>() / mid.len() as f64).sqrt()
    }

    #[test]
    fn lowpass_attenuates_tone_at_ten_times_cutoff() {
        let fs = 10_000.0;
        let spec = FilterSpec::lowpass(100.0, 6, fs);
        let sos = spec.design().unwrap();

        let x = tone(1_000.0, fs, 4_096);
        let y = sos.filtfilt(&x).unwrap();

        let ratio = mid_rms(&y) / mid_rms(&x);
        let db = 20.0 * ratio.log10();
        assert!(db < -20.0, "expected > 20 dB attenuation, got {db:.1} dB");
    }

    #[test]
    fn lowpass_passes_tone_well_below_cutoff() {
        let fs = 10_000.0;
        let sos = FilterSpec::lowpass(1_000.0, 4, fs).design().unwrap();

        let x = tone(50.0, fs, 4_096);
        let y = sos.filtfilt(&x).unwrap();

        let ratio = mid_rms(&y) / mid_rms(&x);
        assert!(
            (ratio - 1.0).abs() < 0.01,
            "passband tone should be unchanged, gain = {ratio}"
        );
    }

    #[test]
    fn highpass_rejects_low_and_passes_high() {
        let fs = 10_000.0;
        let sos = FilterSpec::highpass(500.0, 4, fs).design().unwrap();

        let low = tone(50.0, fs, 4_096);
        let high = tone(2_000.0, fs, 4_096);

        let low_gain = mid_rms(&sos.filtfilt(&low).unwrap()) / mid_rms(&low);
        let high_gain = mid_rms(&sos.filtfilt(&high).unwrap()) / mid_rms(&high);

        assert!(low_gain < 0.01, "low tone should be rejected, gain = {low_gain}");
        assert!(
            (high_gain - 1.0).abs() < 0.02,
            "high tone should pass, gain = {high_gain}"
        );
    }

    #[test]
    fn bandpass_passes_center_and_rejects_both_sides() {
        let fs = 10_000.0;
        let sos = FilterSpec::bandpass(200.0, 2_000.0, 4, fs).design().unwrap();

        let below = tone(20.0, fs, 8_192);
        let center = tone(700.0, fs, 8_192);
        let above = tone(4_500.0, fs, 8_192);

        let g_below = mid_rms(&sos.filtfilt(&below).unwrap()) / mid_rms(&below);
        let g_center = mid_rms(&sos.filtfilt(&center).unwrap()) / mid_rms(&center);
        let g_above = mid_rms(&sos.filtfilt(&above).unwrap()) / mid_rms(&above);

        assert!(g_center > 0.9, "center should pass, gain = {g_center}");
        assert!(g_below < 0.05, "below-band should be rejected, gain = {g_below}");
        assert!(g_above < 0.05, "above-band should be rejected, gain = {g_above}");
    }

    #[test]
    fn filtfilt_keeps_an_impulse_peak_in_place() {
        let fs = 1_000.0;
        let sos = FilterSpec::lowpass(100.0, 4, fs).design().unwrap();

        let mut x = vec![0.0; 512];
        x[256] = 1.0;
        let y = sos.filtfilt(&x).unwrap();

        let peak_index = y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_index, 256, "zero-phase filtering must not shift the peak");
    }

    #[test]
    fn single_pass_filter_delays_but_filtfilt_does_not() {
        let fs = 1_000.0;
        let sos = FilterSpec::lowpass(50.0, 4, fs).design().unwrap();

        let mut x = vec![0.0; 512];
        x[256] = 1.0;
        let forward_only = sos.filter(&x);

        let peak_index = forward_only
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!(peak_index > 256, "a causal IIR pass must delay the peak");
    }

    #[test]
    fn cutoff_at_or_above_nyquist_is_rejected() {
        let err = FilterSpec::lowpass(500.0, 4, 1_000.0).design().unwrap_err();
        assert!(matches!(err, LabError::InvalidCutoff { .. }));

        let err = FilterSpec::highpass(600.0, 4, 1_000.0).design().unwrap_err();
        assert!(matches!(err, LabError::InvalidCutoff { .. }));
    }

    #[test]
    fn inverted_or_out_of_range_band_edges_are_rejected() {
        let err = FilterSpec::bandpass(300.0, 100.0, 4, 1_000.0)
            .design()
            .unwrap_err();
        assert!(matches!(err, LabError::InvalidBand { .. }));

        let err = FilterSpec::bandpass(100.0, 500.0, 4, 1_000.0)
            .design()
            .unwrap_err();
        assert!(matches!(err, LabError::InvalidBand { .. }));
    }

    #[test]
    fn zero_order_is_rejected() {
        assert!(matches!(
            FilterSpec::lowpass(100.0, 0, 1_000.0).design().unwrap_err(),
            LabError::InvalidOrder
        ));
    }

    #[test]
    fn filtfilt_needs_enough_samples_for_padding() {
        let sos = FilterSpec::lowpass(100.0, 4, 1_000.0).design().unwrap();
        let short = vec![0.0; 10];
        assert!(matches!(
            sos.filtfilt(&short).unwrap_err(),
            LabError::SignalTooShort { .. }
        ));
    }

    #[test]
    fn odd_order_designs_include_a_first_order_section() {
        let sos = FilterSpec::lowpass(100.0, 5, 1_000.0).design().unwrap();
        assert_eq!(sos.sections.len(), 3); // one first-order + two pairs
        let sos = FilterSpec::lowpass(100.0, 4, 1_000.0).design().unwrap();
        assert_eq!(sos.sections.len(), 2);
    }
}
