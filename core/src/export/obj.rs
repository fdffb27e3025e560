//! Wavefront OBJ text export
//!
//! Layout: a header comment, then `v`, `vn`, `vt` and `f` sections in that
//! order, each followed by one blank line. A section is written only when its
//! data is present and non-empty. Face corners reuse the vertex index for
//! every attribute (`a/a/a`, `a/a`, `a//a` or `a`), 1-based.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::ForgeResult;
use crate::mesh::Mesh;

/// First line of every exported file
pub const OBJ_HEADER: &str = "# Generated by meshforge";

#[derive(Clone, Copy)]
enum FaceFormat {
    PositionUvNormal,
    PositionUv,
    PositionNormal,
    Position,
}

impl FaceFormat {
    fn for_mesh(mesh: &Mesh) -> Self {
        match (mesh.uvs0.is_some(), mesh.normals.is_some()) {
            (true, true) => Self::PositionUvNormal,
            (true, false) => Self::PositionUv,
            (false, true) => Self::PositionNormal,
            (false, false) => Self::Position,
        }
    }

    fn write_corner(self, out: &mut String, index: u32) {
        // Infallible: writing into a String
        let _ = match self {
            Self::PositionUvNormal => write!(out, " {index}/{index}/{index}"),
            Self::PositionUv => write!(out, " {index}/{index}"),
            Self::PositionNormal => write!(out, " {index}//{index}"),
            Self::Position => write!(out, " {index}"),
        };
    }
}

/// Render a mesh as OBJ text
///
/// Floats use Rust's shortest round-trip formatting. An empty mesh renders as
/// the header line alone.
pub fn encode_obj(mesh: &Mesh) -> String {
    let mut out = String::with_capacity(32 + mesh.vertex_count() * 40 + mesh.triangles.len() * 8);
    out.push_str(OBJ_HEADER);
    out.push('\n');

    if !mesh.vertices.is_empty() {
        for v in &mesh.vertices {
            let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
        }
        out.push('\n');
    }

    if let Some(normals) = mesh.normals.as_ref().filter(|n| !n.is_empty()) {
        for n in normals {
            let _ = writeln!(out, "vn {} {} {}", n.x, n.y, n.z);
        }
        out.push('\n');
    }

    if let Some(uvs) = mesh.uvs0.as_ref().filter(|uv| !uv.is_empty()) {
        for uv in uvs {
            let _ = writeln!(out, "vt {} {}", uv.x, uv.y);
        }
        out.push('\n');
    }

    if !mesh.triangles.is_empty() {
        let format = FaceFormat::for_mesh(mesh);
        for [a, b, c] in mesh.triangle_indices() {
            out.push('f');
            for index in [a, b, c] {
                format.write_corner(&mut out, index + 1);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Write OBJ text to any writer
pub fn write_obj_to<W: Write>(mesh: &Mesh, mut writer: W) -> ForgeResult<()> {
    writer.write_all(encode_obj(mesh).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh to an OBJ file, creating or truncating it
pub fn write_obj(mesh: &Mesh, path: impl AsRef<Path>) -> ForgeResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_obj_to(mesh, BufWriter::new(file))?;

    info!(
        "Wrote OBJ {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}
