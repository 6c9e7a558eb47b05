use thiserror::Error;

use crate::normalize::Strategy;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Vertex set is empty")]
    EmptyVertexSet,
    #[error("Invalid bin count: {0} (at least 2 bins are required)")]
    InvalidBinCount(u32),
    #[error("Vertex count mismatch: original has {0} points, reconstructed has {1}")]
    LengthMismatch(usize, usize),
    #[error("No {} outcome in mesh analysis", .0.display_name())]
    MissingOutcome(Strategy),
}
