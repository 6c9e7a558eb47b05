use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use meshq_core::Point3;

use crate::error::IoError;

/// Writes `vertices` as an ASCII PLY point cloud.
///
/// # Layout
/// A header declaring `element vertex N` with float `x`, `y`, `z` properties,
/// then one space-separated line per vertex.
pub fn write_ply<W: Write>(mut out: W, vertices: &[Point3]) -> std::io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "element vertex {}", vertices.len())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "end_header")?;
    for v in vertices {
        writeln!(out, "{} {} {}", v[0], v[1], v[2])?;
    }
    out.flush()
}

/// Writes a PLY point cloud to `path`, replacing any existing file.
pub fn write_ply_vertices(path: &Path, vertices: &[Point3]) -> Result<(), IoError> {
    let wrap = |source| IoError::Write { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(wrap)?;
    write_ply(BufWriter::new(file), vertices).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_one_line_per_vertex() {
        let mut buf = Vec::new();
        write_ply(&mut buf, &[[0.0, 1.5, -2.0], [3.0, 4.0, 5.25]]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ply");
        assert_eq!(lines[2], "element vertex 2");
        assert_eq!(lines[6], "end_header");
        assert_eq!(lines[7], "0 1.5 -2");
        assert_eq!(lines[8], "3 4 5.25");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn empty_cloud_is_header_only() {
        let mut buf = Vec::new();
        write_ply(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("element vertex 0"));
        assert!(text.ends_with("end_header\n"));
    }
}
