//! Even/odd decomposition page: a source signal over a grid symmetric
//! about t = 0, split into its even and odd parts.

use crate::signal::decompose::even_odd;
use crate::signal::grid::TimeGrid;

const HALF_SPAN: f64 = 10.0;
const NUM_POINTS: usize = 400;

/// Source signals offered by the page.
///
/// `Sine`/`Cosine` take the raw time value as the angle (sin(t), cos(t)),
/// so one period spans 2π seconds. `Piecewise` is a small hand-drawn
/// polyline, zero outside its support, interesting precisely because it is
/// neither even nor odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSignal {
    Sine,
    Cosine,
    Piecewise,
}

impl SourceSignal {
    pub const ALL: [SourceSignal; 3] = [
        SourceSignal::Sine,
        SourceSignal::Cosine,
        SourceSignal::Piecewise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceSignal::Sine => "sin(t)",
            SourceSignal::Cosine => "cos(t)",
            SourceSignal::Piecewise => "piecewise",
        }
    }

    fn sample(&self, t: f64) -> f64 {
        match self {
            SourceSignal::Sine => t.sin(),
            SourceSignal::Cosine => t.cos(),
            SourceSignal::Piecewise => piecewise(t),
        }
    }
}

// Knots of the demo polyline
const KNOT_T: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
const KNOT_X: [f64; 6] = [1.0, 1.0, 0.0, 1.0, 1.0, 2.0];

fn piecewise(t: f64) -> f64 {
    if t < KNOT_T[0] || t > KNOT_T[KNOT_T.len() - 1] {
        return 0.0;
    }
    for seg in 0..KNOT_T.len() - 1 {
        if t <= KNOT_T[seg + 1] {
            let frac = (t - KNOT_T[seg]) / (KNOT_T[seg + 1] - KNOT_T[seg]);
            return KNOT_X[seg] + frac * (KNOT_X[seg + 1] - KNOT_X[seg]);
        }
    }
    0.0
}

#[derive(Debug, Clone)]
pub struct EvenOddOutput {
    pub time: Vec<f64>,
    pub original: Vec<f64>,
    pub even: Vec<f64>,
    pub odd: Vec<f64>,
}

pub fn run(source: SourceSignal) -> EvenOddOutput {
    let grid = TimeGrid::symmetric(HALF_SPAN, NUM_POINTS);
    let original: Vec<f64> = grid.iter().map(|t| source.sample(t)).collect();
    let (even, odd) = even_odd(&original);

    EvenOddOutput {
        time: grid.to_vec(),
        original,
        even,
        odd,
    }
}
