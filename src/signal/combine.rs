#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Pointwise operator between two signals.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOp {
    Add,
    Subtract,
    Multiply,
}

impl SignalOp {
    pub const ALL: [SignalOp; 3] = [SignalOp::Add, SignalOp::Subtract, SignalOp::Multiply];

    pub fn label(&self) -> &'static str {
        match self {
            SignalOp::Add => "Addition",
            SignalOp::Subtract => "Subtraction",
            SignalOp::Multiply => "Multiplication",
        }
    }
}

/// Combine two equal-length signals pointwise.
///
/// The lab guarantees equal lengths by deriving both operands from the same
/// time grid; anything else is a caller bug surfaced as `LengthMismatch`.
pub fn combine(a: &[f64], b: &[f64], op: SignalOp) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(LabError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let combined = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| match op {
            SignalOp::Add => x + y,
            SignalOp::Subtract => x - y,
            SignalOp::Multiply => x * y,
        })
        .collect();

    Ok(combined)
}
