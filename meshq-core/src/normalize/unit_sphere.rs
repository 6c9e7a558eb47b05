use log::warn;

use crate::error::CoreError;
use crate::vertex::{centroid, norm, Point3};

/// Unit-sphere normalization.
///
/// Returns `(normalized, centroid, scale)` where `scale` is the largest
/// centroid-relative distance. Every output point lies in the closed unit ball.
/// A zero radius (all points coincide) falls back to `scale = 1.0`. Any
/// radius that is a normal float is used as-is, however small next to the
/// centroid, so tight clusters far from the origin keep their resolution.
pub fn sphere_normalize(points: &[Point3]) -> Result<(Vec<Point3>, Point3, f64), CoreError> {
    let center = centroid(points).ok_or(CoreError::EmptyVertexSet)?;

    let shifted: Vec<Point3> = points
        .iter()
        .map(|p| [p[0] - center[0], p[1] - center[1], p[2] - center[2]])
        .collect();

    let radius = shifted.iter().map(norm).fold(0.0f64, f64::max);
    let scale = if !radius.is_normal() {
        warn!("Degenerate bounding sphere: radius {} around centroid {:?}, using scale 1.0.", radius, center);
        1.0
    } else {
        radius
    };

    let normalized = shifted
        .into_iter()
        .map(|p| [p[0] / scale, p[1] / scale, p[2] / scale])
        .collect();

    Ok((normalized, center, scale))
}
