//! meshq core: the numeric half of the vertex quantization study.
//!
//! Every operation in this crate is a pure function over in-memory vertex
//! arrays. A mesh flows through `normalize -> quantize -> dequantize ->
//! denormalize`, and the reconstruction is then scored against the original
//! per axis. File formats, charts and batch orchestration live in `meshq-io`
//! and `meshq-cli`.

pub mod error;
pub mod vertex;
pub mod stats;
pub mod normalize;
pub mod quantize;
pub mod reconstruct;
pub mod metrics;
pub mod pipeline;
pub mod report;

// Re-exports for the I/O and CLI crates
pub use error::CoreError;
pub use vertex::{Point3, AXES};
pub use stats::MeshStats;
pub use normalize::{NormalizationParams, Normalized, Strategy};
pub use quantize::{UniformQuantizer, DEFAULT_BINS};
pub use metrics::{compute_errors, ErrorRecord};
pub use pipeline::{analyze_mesh, MeshAnalysis, StrategyOutcome};
pub use report::{ArtifactPaths, MeshResult};
