use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use meshq_core::MeshResult;

use crate::error::IoError;

/// Serializes the batch summary as a pretty-printed JSON array.
pub fn write_summary(path: &Path, results: &[MeshResult]) -> Result<(), IoError> {
    let file = File::create(path).map_err(|source| IoError::Write { path: path.to_path_buf(), source })?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, results)
        .map_err(|source| IoError::Json { path: path.to_path_buf(), source })?;
    out.write_all(b"\n")
        .and_then(|_| out.flush())
        .map_err(|source| IoError::Write { path: path.to_path_buf(), source })?;

    info!("Summary with {} mesh record(s) written to {}", results.len(), path.display());
    Ok(())
}

/// Reads a summary previously written by [`write_summary`].
pub fn read_summary(path: &Path) -> Result<Vec<MeshResult>, IoError> {
    let file = File::open(path).map_err(|source| IoError::Open { path: path.to_path_buf(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| IoError::Json { path: path.to_path_buf(), source })
}
