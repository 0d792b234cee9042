//! OBJ-style text export.
//!
//! Format: one `v x y z` line per pool vertex (positions multiplied by a
//! uniform scale), then one `f i j k` line per triangle with 1-based indices,
//! in insertion order. Normals are not written. Floats use Rust's shortest
//! round-trip formatting, so identical meshes always produce identical files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::mesh::Mesh;

/// Default uniform scale from 26.6 output units to export units.
pub const EXPORT_SCALE: f32 = 0.01;

/// Write `mesh` to any writer.
pub fn write_obj<W: Write>(mesh: &Mesh, scale: f32, mut w: W) -> io::Result<()> {
    for v in mesh.vertices() {
        let [x, y, z] = v.position;
        writeln!(w, "v {} {} {}", x * scale, y * scale, z * scale)?;
    }
    for [a, b, c] in mesh.triangles() {
        writeln!(w, "f {a} {b} {c}")?;
    }
    w.flush()
}

/// Write `mesh` to a file at `path`.
pub fn save_obj(path: impl AsRef<Path>, mesh: &Mesh, scale: f32) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    write_obj(mesh, scale, BufWriter::new(file))
}

/// Record counts of an exported mesh, read back from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjSummary {
    pub vertices: usize,
    pub faces: usize,
}

/// Count `v` and `f` records. Faces referencing vertices outside the file are
/// reported as `InvalidData`.
pub fn read_obj_summary<R: io::Read>(reader: R) -> io::Result<ObjSummary> {
    let mut summary = ObjSummary::default();
    let mut max_index = 0usize;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => summary.vertices += 1,
            Some("f") => {
                summary.faces += 1;
                for field in fields {
                    // Accept `i`, `i/t`, `i/t/n`.
                    let idx = field.split('/').next().unwrap_or_default();
                    let idx: usize = idx.parse().map_err(|_| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("bad face index {field:?}"),
                        )
                    })?;
                    max_index = max_index.max(idx);
                }
            }
            _ => {}
        }
    }

    if max_index > summary.vertices {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "face index {max_index} exceeds vertex count {}",
                summary.vertices
            ),
        ));
    }
    Ok(summary)
}
