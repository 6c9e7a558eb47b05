use crate::normalize::Normalized;
use crate::quantize::{QuantizedPoint, UniformQuantizer};
use crate::vertex::Point3;

/// Output of one lossy round trip through the quantizer.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// Lattice coordinates, each in `0..bins`.
    pub quantized: Vec<QuantizedPoint>,
    /// Original-space approximation of the source vertices.
    pub points: Vec<Point3>,
}

/// Runs `to_unit -> quantize -> dequantize -> from_unit -> denormalize`.
///
/// Rounding is applied in normalized space, before the inverse affine map, so
/// the absolute error scales with the box extent or sphere radius.
pub fn reconstruct(normalized: &Normalized, quantizer: &UniformQuantizer) -> Reconstruction {
    let params = &normalized.params;

    let unit: Vec<Point3> = normalized.points.iter().map(|p| params.to_unit(p)).collect();
    let quantized = quantizer.quantize(&unit);
    let points = quantizer
        .dequantize(&quantized)
        .iter()
        .map(|u| params.denormalize_point(&params.from_unit(u)))
        .collect();

    Reconstruction { quantized, points }
}
