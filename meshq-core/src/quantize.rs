use crate::error::CoreError;
use crate::vertex::Point3;

/// 10-bit fixed point.
pub const DEFAULT_BINS: u32 = 1024;

/// A vertex on the integer lattice, one bin index per axis.
pub type QuantizedPoint = [u32; 3];

/// Uniform Scalar Quantizer
///
/// Maps `[0.0, 1.0]` onto the lattice `0..bins` with round-half-up and back to
/// the bin position. The forward map is many-to-one, so a round trip moves a
/// coordinate by at most [`max_error`](Self::max_error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformQuantizer {
    bins: u32,
}

impl UniformQuantizer {
    /// # Errors
    /// Returns `InvalidBinCount` when `bins < 2`.
    pub fn new(bins: u32) -> Result<Self, CoreError> {
        if bins < 2 {
            return Err(CoreError::InvalidBinCount(bins));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> u32 {
        self.bins
    }

    /// Largest index on the lattice.
    #[inline]
    fn top(&self) -> f64 {
        (self.bins - 1) as f64
    }

    /// Worst-case round-trip error in normalized space: half a bin.
    pub fn max_error(&self) -> f64 {
        0.5 / self.top()
    }

    /// Quantize a single normalized coordinate.
    #[inline]
    pub fn quantize_scalar(&self, value: f64) -> u32 {
        let top = self.top();
        // floor(x + 0.5) is round-half-up; the clamp absorbs float overshoot at 1.0.
        let mapped = (value * top + 0.5).floor();
        mapped.clamp(0.0, top) as u32
    }

    #[inline]
    pub fn dequantize_scalar(&self, q: u32) -> f64 {
        q as f64 / self.top()
    }

    pub fn quantize(&self, normalized: &[Point3]) -> Vec<QuantizedPoint> {
        normalized
            .iter()
            .map(|p| [
                self.quantize_scalar(p[0]),
                self.quantize_scalar(p[1]),
                self.quantize_scalar(p[2]),
            ])
            .collect()
    }

    pub fn dequantize(&self, quantized: &[QuantizedPoint]) -> Vec<Point3> {
        quantized
            .iter()
            .map(|q| [
                self.dequantize_scalar(q[0]),
                self.dequantize_scalar(q[1]),
                self.dequantize_scalar(q[2]),
            ])
            .collect()
    }
}

impl Default for UniformQuantizer {
    fn default() -> Self {
        Self { bins: DEFAULT_BINS }
    }
}
