//! meshq I/O: everything that touches the filesystem.
//!
//! Reads vertex positions out of Wavefront OBJ text, writes reconstructions as
//! ASCII PLY point clouds, renders SVG charts and serializes the batch summary.
//! None of it feeds back into the numbers computed by `meshq-core`.

pub mod error;
pub mod obj;
pub mod ply;
pub mod chart;
pub mod summary;

// Re-exports for easier access by meshq-cli
pub use error::IoError;
pub use obj::{load_obj_vertices, ObjScan};
pub use ply::write_ply_vertices;
pub use chart::{render_error_bars, render_scatter_comparison, ErrorMetric};
pub use summary::{read_summary, write_summary};
