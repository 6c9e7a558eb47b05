use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::vertex::{axis_bounds, centroid, Point3};

/// Descriptive statistics of a raw vertex set, one value per axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub min: Point3,
    pub max: Point3,
    pub mean: Point3,
    /// Population standard deviation (divides by N).
    pub std: Point3,
}

impl MeshStats {
    pub fn compute(points: &[Point3]) -> Result<Self, CoreError> {
        let (min, max) = axis_bounds(points).ok_or(CoreError::EmptyVertexSet)?;
        let mean = centroid(points).ok_or(CoreError::EmptyVertexSet)?;

        let mut var = [0.0f64; 3];
        for p in points {
            for a in 0..3 {
                let d = p[a] - mean[a];
                var[a] += d * d;
            }
        }
        let n = points.len() as f64;
        let std = [
            (var[0] / n).sqrt(),
            (var[1] / n).sqrt(),
            (var[2] / n).sqrt(),
        ];

        Ok(Self { min, max, mean, std })
    }
}
