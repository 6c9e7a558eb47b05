use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Failed to open {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("Failed to serialize summary {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}
