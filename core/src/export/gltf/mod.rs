//! glTF 2.0 export and import
//!
//! One mesh becomes one document with a single buffer, one mesh, one node and
//! one scene. Positions are always written as `POSITION` with min/max bounds;
//! optional channels map to `NORMAL`, `TEXCOORD_0`, `TEXCOORD_1`, `COLOR_0`
//! and `TANGENT`. Coordinates are written unchanged.

mod buffer;
mod container;
mod document;
mod reader;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gltf_json as json;
use tracing::info;

use crate::error::{ForgeError, ForgeResult};
use crate::mesh::Mesh;

pub use buffer::MAX_U16_INDEX;
pub use container::{DATA_URI_PREFIX, GLB_MAGIC};
pub use reader::{decode_gltf, read_all_meshes, read_gltf};

use buffer::BufferBuilder;
use container::{assemble_glb, data_uri};
use document::{GltfBuilder, MeshAccessors};

/// `asset.generator` of every exported document
pub const GENERATOR: &str = "meshforge";

/// Container chosen from the output path extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GltfFormat {
    /// `.gltf` JSON with an embedded base64 buffer
    Json,
    /// `.glb` binary container
    Binary,
}

impl GltfFormat {
    /// `.glb` (any case) selects binary, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("glb") => Self::Binary,
            _ => Self::Json,
        }
    }
}

/// Pack the mesh channels and describe them in a document
///
/// With `embed_buffer` the buffer is referenced through a base64 data URI,
/// otherwise it is left for the GLB binary chunk.
fn build_document(mesh: &Mesh, embed_buffer: bool) -> ForgeResult<(json::Root, Vec<u8>)> {
    if mesh.is_empty() {
        return Err(ForgeError::invalid_operation(
            "cannot export a mesh without vertices",
        ));
    }
    mesh.validate()?;

    let mut buffer = BufferBuilder::new();
    let accessors = MeshAccessors {
        positions: buffer.pack_positions(&mesh.vertices),
        normals: mesh.normals.as_deref().map(|n| buffer.pack_vec3(n)),
        uvs0: mesh.uvs0.as_deref().map(|uv| buffer.pack_vec2(uv)),
        uvs1: mesh.uvs1.as_deref().map(|uv| buffer.pack_vec2(uv)),
        colors: mesh.colors.as_deref().map(|c| buffer.pack_vec4(c)),
        tangents: mesh.tangents.as_deref().map(|t| buffer.pack_vec4(t)),
        indices: (!mesh.triangles.is_empty()).then(|| buffer.pack_indices(&mesh.triangles)),
    };

    let mut builder = GltfBuilder::new()
        .buffer_byte_length(buffer.data().len() as u64)
        .add_mesh_from_accessors("Mesh", &accessors)
        .add_mesh_node("Mesh")
        .add_scene("Scene", &[0]);
    if embed_buffer {
        builder = builder.buffer_uri(data_uri(buffer.data()));
    }

    let root = builder.build(buffer.views(), buffer.accessors(), GENERATOR);
    Ok((root, buffer.take_data()))
}

/// Encode a mesh as a binary `.glb` container
pub fn encode_glb(mesh: &Mesh) -> ForgeResult<Vec<u8>> {
    let (root, data) = build_document(mesh, false)?;
    assemble_glb(&root, &data)
}

/// Encode a mesh as `.gltf` JSON with the buffer embedded as a data URI
pub fn encode_gltf(mesh: &Mesh) -> ForgeResult<String> {
    let (root, _) = build_document(mesh, true)?;
    Ok(serde_json::to_string_pretty(&root)?)
}

/// Write a mesh to `.gltf` or `.glb`, chosen by extension
///
/// Encoding happens before the file is opened, so a rejected mesh leaves no
/// file behind.
pub fn write_gltf(mesh: &Mesh, path: impl AsRef<Path>) -> ForgeResult<()> {
    let path = path.as_ref();
    let format = GltfFormat::from_path(path);
    let bytes = match format {
        GltfFormat::Binary => encode_glb(mesh)?,
        GltfFormat::Json => encode_gltf(mesh)?.into_bytes(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    info!(
        "Wrote {:?} glTF {}: {} vertices, {} triangles, {} bytes",
        format,
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3, Vec4};

    fn quad() -> Mesh {
        let mut mesh = Mesh::from_geometry(
            vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 2, 1, 0, 3, 2],
        );
        mesh.normals = Some(vec![Vec3::Z; 4]);
        mesh.uvs0 = Some(vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        mesh
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(GltfFormat::from_path(Path::new("a.glb")), GltfFormat::Binary);
        assert_eq!(GltfFormat::from_path(Path::new("a.GLB")), GltfFormat::Binary);
        assert_eq!(GltfFormat::from_path(Path::new("a.gltf")), GltfFormat::Json);
        assert_eq!(GltfFormat::from_path(Path::new("noext")), GltfFormat::Json);
    }

    #[test]
    fn test_glb_header_and_chunks() {
        let glb = encode_glb(&quad()).unwrap();

        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(u32_at(&glb, 4), 2);
        assert_eq!(u32_at(&glb, 8) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_len = u32_at(&glb, 12) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(&glb[16..20], b"JSON");

        let bin_header = 20 + json_len;
        assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
        // positions 48 + normals 48 + uvs 32 + 6 u16 indices 12
        assert_eq!(u32_at(&glb, bin_header), 140);
    }

    #[test]
    fn test_glb_decodes() {
        let mesh = quad();
        let decoded = decode_gltf(&encode_glb(&mesh).unwrap()).unwrap();
        assert_eq!(decoded, mesh);
    }

    #[test]
    fn test_gltf_embeds_buffer() {
        let text = encode_gltf(&quad()).unwrap();
        assert!(text.contains(DATA_URI_PREFIX));
        assert!(text.contains("\"generator\": \"meshforge\""));

        let decoded = decode_gltf(text.as_bytes()).unwrap();
        assert_eq!(decoded, quad());
    }

    #[test]
    fn test_all_channels_survive() {
        let mut mesh = quad();
        mesh.uvs1 = Some(vec![Vec2::new(0.25, 0.75); 4]);
        mesh.colors = Some(vec![Vec4::new(0.1, 0.2, 0.3, 1.0); 4]);
        mesh.tangents = Some(vec![Vec4::new(1.0, 0.0, 0.0, -1.0); 4]);

        let decoded = decode_gltf(&encode_glb(&mesh).unwrap()).unwrap();
        assert_eq!(decoded, mesh);
    }

    #[test]
    fn test_point_cloud_has_no_indices_accessor() {
        let mesh = Mesh::from_geometry(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec::new());
        let (root, _) = build_document(&mesh, false).unwrap();
        assert!(root.meshes[0].primitives[0].indices.is_none());
        assert_eq!(root.accessors.len(), 1);
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert!(matches!(
            encode_glb(&Mesh::new()),
            Err(ForgeError::InvalidOperation(_))
        ));
        assert!(encode_gltf(&Mesh::new()).is_err());
    }

    #[test]
    fn test_invalid_mesh_rejected() {
        let mut mesh = quad();
        mesh.triangles.push(9);
        assert!(encode_glb(&mesh).is_err());
    }
}
