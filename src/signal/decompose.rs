/*
Even/Odd Decomposition
======================

Any signal splits uniquely into a symmetric (even) and antisymmetric (odd)
part about its midpoint:

    even[i] = (x[i] + x[rev(i)]) / 2
    odd[i]  = (x[i] - x[rev(i)]) / 2       rev(i) = len - 1 - i

By construction even + odd == x for every sample, no matter the grid. The
textbook reading — even(t) = even(-t), odd(t) = -odd(-t) — additionally
requires the time grid to be symmetric about t = 0 (`TimeGrid::symmetric`);
that precondition is on the caller.
*/

/// Split `x` into (even, odd) parts about the sequence midpoint.
pub fn even_odd(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len();
    let mut even = Vec::with_capacity(n);
    let mut odd = Vec::with_capacity(n);

    for i in 0..n {
        let mirrored = x[n - 1 - i];
        even.push(0.5 * (x[i] + mirrored));
        odd.push(0.5 * (x[i] - mirrored));
    }

    (even, odd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::grid::TimeGrid;
    use crate::signal::synth::{synthesize, WaveParams, Waveform};

    #[test]
    fn even_plus_odd_reconstructs_signal() {
        let grid = TimeGrid::symmetric(10.0, 400);
        let params = WaveParams::new(1.0, 0.16, 0.3, Waveform::Sine);
        let x = synthesize(&params, &grid);

        let (even, odd) = even_odd(&x);
        for i in 0..x.len() {
            let rebuilt = even[i] + odd[i];
            assert!(
                (rebuilt - x[i]).abs() <= 1e-9 * x[i].abs().max(1.0),
                "sample {i}: {} != {}",
                rebuilt,
                x[i]
            );
        }
    }

    #[test]
    fn parts_have_the_expected_symmetry() {
        let grid = TimeGrid::symmetric(5.0, 201);
        let params = WaveParams::new(2.0, 0.3, 0.7, Waveform::Cosine);
        let x = synthesize(&params, &grid);

        let (even, odd) = even_odd(&x);
        let n = x.len();
        for i in 0..n {
            assert!((even[i] - even[n - 1 - i]).abs() < 1e-12, "even part must mirror");
            assert!((odd[i] + odd[n - 1 - i]).abs() < 1e-12, "odd part must anti-mirror");
        }
    }

    #[test]
    fn pure_sine_on_symmetric_grid_is_all_odd() {
        let grid = TimeGrid::symmetric(10.0, 401);
        // sin(t): no phase, so time-reversal flips the sign everywhere
        let x: Vec<f64> = grid.iter().map(f64::sin).collect();
        let (even, odd) = even_odd(&x);

        let even_energy: f64 = even.iter().map(|&v| v * v).sum();
        let odd_energy: f64 = odd.iter().map(|&v| v * v).sum();
        assert!(even_energy < 1e-18 * odd_energy.max(1.0));
    }
}
