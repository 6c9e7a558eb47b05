//! Normalization strategies.
//!
//! Each strategy maps raw vertices into a bounded space and returns the
//! parameters needed to undo the mapping. The parameters are computed once
//! from the original vertex set and are the only thing the inverse path ever
//! looks at.

pub mod bounding_box;
pub mod unit_sphere;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::vertex::Point3;

pub use bounding_box::box_normalize;
pub use unit_sphere::sphere_normalize;

/// The closed set of normalization strategies compared by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Per-axis min/max rescale into `[0, 1]`.
    MinMax,
    /// Center on the centroid and scale by the bounding radius.
    UnitSphere,
}

impl Strategy {
    /// Every strategy, in the order results are reported.
    pub const ALL: [Strategy; 2] = [Strategy::MinMax, Strategy::UnitSphere];

    /// Short machine name used for artifact file names and summary keys.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::MinMax => "minmax",
            Strategy::UnitSphere => "unitsphere",
        }
    }

    /// Human readable name for charts and logs.
    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::MinMax => "Min-Max",
            Strategy::UnitSphere => "Unit Sphere",
        }
    }

    /// Normalizes `points` and records the inverse parameters.
    pub fn normalize(self, points: &[Point3]) -> Result<Normalized, CoreError> {
        match self {
            Strategy::MinMax => {
                let (points, vmin, vmax) = box_normalize(points)?;
                Ok(Normalized { points, params: NormalizationParams::Box { vmin, vmax } })
            }
            Strategy::UnitSphere => {
                let (points, centroid, scale) = sphere_normalize(points)?;
                Ok(Normalized { points, params: NormalizationParams::Sphere { centroid, scale } })
            }
        }
    }
}

/// Inverse-mapping data for one normalized vertex set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NormalizationParams {
    Box { vmin: Point3, vmax: Point3 },
    Sphere { centroid: Point3, scale: f64 },
}

impl NormalizationParams {
    pub fn strategy(&self) -> Strategy {
        match self {
            NormalizationParams::Box { .. } => Strategy::MinMax,
            NormalizationParams::Sphere { .. } => Strategy::UnitSphere,
        }
    }

    /// Maps a normalized point into the quantizer domain `[0, 1]`.
    /// Box output already lives there; sphere output is shifted from `[-1, 1]`.
    #[inline]
    pub fn to_unit(&self, p: &Point3) -> Point3 {
        match self {
            NormalizationParams::Box { .. } => *p,
            NormalizationParams::Sphere { .. } => [
                (p[0] + 1.0) / 2.0,
                (p[1] + 1.0) / 2.0,
                (p[2] + 1.0) / 2.0,
            ],
        }
    }

    /// Inverse of [`to_unit`](Self::to_unit).
    #[inline]
    pub fn from_unit(&self, u: &Point3) -> Point3 {
        match self {
            NormalizationParams::Box { .. } => *u,
            NormalizationParams::Sphere { .. } => [
                u[0] * 2.0 - 1.0,
                u[1] * 2.0 - 1.0,
                u[2] * 2.0 - 1.0,
            ],
        }
    }

    /// Maps one normalized point back into the original coordinate space.
    #[inline]
    pub fn denormalize_point(&self, p: &Point3) -> Point3 {
        match self {
            NormalizationParams::Box { vmin, vmax } => [
                p[0] * (vmax[0] - vmin[0]) + vmin[0],
                p[1] * (vmax[1] - vmin[1]) + vmin[1],
                p[2] * (vmax[2] - vmin[2]) + vmin[2],
            ],
            NormalizationParams::Sphere { centroid, scale } => [
                p[0] * scale + centroid[0],
                p[1] * scale + centroid[1],
                p[2] * scale + centroid[2],
            ],
        }
    }

    pub fn denormalize(&self, points: &[Point3]) -> Vec<Point3> {
        points.iter().map(|p| self.denormalize_point(p)).collect()
    }
}

/// A normalized vertex set together with its inverse parameters.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub points: Vec<Point3>,
    pub params: NormalizationParams,
}
