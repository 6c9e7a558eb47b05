use log::warn;

use crate::error::CoreError;
use crate::vertex::{axis_bounds, is_degenerate, Point3, AXES};

/// Min-max ("box") normalization into `[0, 1]` per axis.
///
/// Returns `(normalized, vmin, vmax)`. An axis whose extent is zero (or float
/// noise around zero) is degenerate: its denominator becomes 1 and every point
/// is written as exactly 0 on that axis.
pub fn box_normalize(points: &[Point3]) -> Result<(Vec<Point3>, Point3, Point3), CoreError> {
    let (vmin, vmax) = axis_bounds(points).ok_or(CoreError::EmptyVertexSet)?;

    let mut denom = [1.0f64; 3];
    let mut degenerate = [false; 3];
    for a in 0..3 {
        let extent = vmax[a] - vmin[a];
        if is_degenerate(extent, vmin[a].abs().max(vmax[a].abs())) {
            degenerate[a] = true;
            warn!("Degenerate bounding box: axis {} has zero extent (value {}).", AXES[a], vmin[a]);
        } else {
            denom[a] = extent;
        }
    }

    let normalized = points
        .iter()
        .map(|p| {
            let mut out = [0.0f64; 3];
            for a in 0..3 {
                if !degenerate[a] {
                    out[a] = (p[a] - vmin[a]) / denom[a];
                }
            }
            out
        })
        .collect();

    Ok((normalized, vmin, vmax))
}
