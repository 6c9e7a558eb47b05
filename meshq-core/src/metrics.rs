use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::vertex::Point3;

/// Per-axis reconstruction error for one (mesh, strategy) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Mean squared error per axis.
    pub mse: Point3,
    /// Mean absolute error per axis.
    pub mae: Point3,
}

/// Per-axis MSE and MAE between two vertex sets of equal length.
///
/// # Errors
/// `LengthMismatch` when the sets differ in length, `EmptyVertexSet` when both
/// are empty (the means are undefined).
pub fn compute_errors(original: &[Point3], reconstructed: &[Point3]) -> Result<ErrorRecord, CoreError> {
    if original.len() != reconstructed.len() {
        return Err(CoreError::LengthMismatch(original.len(), reconstructed.len()));
    }
    if original.is_empty() {
        return Err(CoreError::EmptyVertexSet);
    }

    let mut sq = [0.0f64; 3];
    let mut abs = [0.0f64; 3];
    for (o, r) in original.iter().zip(reconstructed.iter()) {
        for a in 0..3 {
            let d = o[a] - r[a];
            sq[a] += d * d;
            abs[a] += d.abs();
        }
    }

    let n = original.len() as f64;
    Ok(ErrorRecord {
        mse: [sq[0] / n, sq[1] / n, sq[2] / n],
        mae: [abs[0] / n, abs[1] / n, abs[2] / n],
    })
}
