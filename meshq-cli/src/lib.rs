//! meshq command line front end: argument parsing and the batch runner that
//! drives `meshq-core` over a directory of meshes.

pub mod config;
pub mod batch;

pub use batch::{BatchConfig, BatchReport, BatchRunner};
pub use config::Args;
