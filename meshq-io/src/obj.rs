use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use meshq_core::Point3;

use crate::error::IoError;

/// Vertex positions recovered from an OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjScan {
    pub vertices: Vec<Point3>,
    /// `v ` lines dropped for having fewer than three numbers or bad numbers.
    pub skipped_lines: usize,
}

fn parse_coord(field: Option<&str>) -> Option<f64> {
    field?.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses one `v x y z [w]` line. Returns `None` for anything malformed,
/// including `nan` and `inf` coordinates.
fn parse_vertex_line(line: &str) -> Option<Point3> {
    let mut fields = line.split_whitespace().skip(1);
    let x = parse_coord(fields.next())?;
    let y = parse_coord(fields.next())?;
    let z = parse_coord(fields.next())?;
    Some([x, y, z])
}

/// Extracts vertex positions from OBJ text.
///
/// Only lines starting with `v ` are considered; faces, normals and texture
/// coordinates are ignored. Lines end at `\n`, `\r\n` or a lone `\r`.
/// Invalid UTF-8 is replaced rather than rejected and malformed vertex lines
/// are counted and skipped.
pub fn parse_obj_vertices<R: BufRead>(mut reader: R) -> std::io::Result<ObjScan> {
    let mut scan = ObjScan::default();
    let mut line_buf = Vec::with_capacity(256);
    let mut line_no = 0usize;

    loop {
        line_buf.clear();
        if reader.read_until(b'\n', &mut line_buf)? == 0 {
            break;
        }

        // Old Mac exports separate lines with a bare '\r'.
        for raw in line_buf.split(|&b| b == b'\r') {
            if raw.is_empty() || raw == b"\n" {
                continue;
            }
            line_no += 1;

            if !raw.starts_with(b"v ") {
                continue;
            }
            let line = String::from_utf8_lossy(raw);
            match parse_vertex_line(&line) {
                Some(p) => scan.vertices.push(p),
                None => {
                    debug!("Skipping malformed vertex on line {}: {:?}", line_no, line.trim_end());
                    scan.skipped_lines += 1;
                }
            }
        }
    }

    Ok(scan)
}

/// Loads vertex positions from the OBJ file at `path`.
pub fn load_obj_vertices(path: &Path) -> Result<ObjScan, IoError> {
    let file = File::open(path).map_err(|source| IoError::Open { path: path.to_path_buf(), source })?;
    let scan = parse_obj_vertices(BufReader::new(file))
        .map_err(|source| IoError::Read { path: path.to_path_buf(), source })?;

    if scan.skipped_lines > 0 {
        warn!("{}: skipped {} malformed vertex line(s).", path.display(), scan.skipped_lines);
    }
    Ok(scan)
}
