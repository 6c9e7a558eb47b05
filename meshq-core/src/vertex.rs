/// A single vertex position. Axis order is always X, Y, Z.
pub type Point3 = [f64; 3];

/// Axis labels in storage order.
pub const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Relative tolerance used for the degenerate-extent checks.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Per-axis minimum and maximum over all points.
/// Returns `None` for an empty slice.
pub fn axis_bounds(points: &[Point3]) -> Option<(Point3, Point3)> {
    if points.is_empty() {
        return None;
    }

    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in points {
        for a in 0..3 {
            if p[a] < min[a] { min[a] = p[a]; }
            if p[a] > max[a] { max[a] = p[a]; }
        }
    }
    Some((min, max))
}

/// Per-axis arithmetic mean. Returns `None` for an empty slice.
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }

    let mut sum = [0.0f64; 3];
    for p in points {
        for a in 0..3 {
            sum[a] += p[a];
        }
    }
    let n = points.len() as f64;
    Some([sum[0] / n, sum[1] / n, sum[2] / n])
}

/// Euclidean length of a point treated as a vector.
#[inline]
pub fn norm(p: &Point3) -> f64 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}

/// True when `extent` is indistinguishable from zero relative to `magnitude`.
///
/// Float noise in a subtraction like `vmax - vmin` scales with the operands, so
/// the threshold is relative to the larger of `magnitude` and 1.
#[inline]
pub fn is_degenerate(extent: f64, magnitude: f64) -> bool {
    extent.abs() <= DEGENERATE_EPSILON * magnitude.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_centroid() {
        let pts = vec![[0.0, -2.0, 5.0], [4.0, 2.0, 5.0], [2.0, 0.0, 5.0]];
        let (min, max) = axis_bounds(&pts).unwrap();
        assert_eq!(min, [0.0, -2.0, 5.0]);
        assert_eq!(max, [4.0, 2.0, 5.0]);
        assert_eq!(centroid(&pts).unwrap(), [2.0, 0.0, 5.0]);
    }

    #[test]
    fn empty_has_no_bounds() {
        assert!(axis_bounds(&[]).is_none());
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn degenerate_is_relative() {
        assert!(is_degenerate(0.0, 0.0));
        assert!(is_degenerate(1e-9, 1e6));
        assert!(!is_degenerate(1e-9, 1.0));
        assert!(!is_degenerate(0.5, 100.0));
    }
}
