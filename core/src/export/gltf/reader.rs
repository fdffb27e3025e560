//! glTF/GLB loading back into [`Mesh`]

use std::path::Path;

use glam::{Vec2, Vec3, Vec4};
use tracing::{debug, info};

use crate::error::{ForgeError, ForgeResult};
use crate::mesh::Mesh;

/// Convert one triangle-list primitive into a mesh
///
/// Missing indices on a non-indexed primitive are replaced by `0..N`.
fn mesh_from_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> ForgeResult<Mesh> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return Err(ForgeError::invalid_operation(format!(
            "primitive mode {:?} is not a triangle list",
            primitive.mode()
        )));
    }

    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    // Positions (required)
    let vertices: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| ForgeError::invalid_operation("primitive has no POSITION attribute"))?
        .map(Vec3::from)
        .collect();

    let normals = reader
        .read_normals()
        .map(|iter| iter.map(Vec3::from).collect());
    let uvs0 = reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().map(Vec2::from).collect());
    let uvs1 = reader
        .read_tex_coords(1)
        .map(|iter| iter.into_f32().map(Vec2::from).collect());
    // COLOR_0 may be RGB or RGBA, normalized integers or floats
    let colors = reader
        .read_colors(0)
        .map(|iter| iter.into_rgba_f32().map(Vec4::from).collect());
    let tangents = reader
        .read_tangents()
        .map(|iter| iter.map(Vec4::from).collect());

    let triangles = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    let mesh = Mesh {
        vertices,
        normals,
        uvs0,
        uvs1,
        colors,
        tangents,
        triangles,
    };
    mesh.validate()?;
    Ok(mesh)
}

fn first_mesh(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> ForgeResult<Mesh> {
    let mesh = document
        .meshes()
        .next()
        .ok_or_else(|| ForgeError::invalid_operation("no meshes found in glTF"))?;
    let primitive = mesh
        .primitives()
        .next()
        .ok_or_else(|| ForgeError::invalid_operation("no primitives found in mesh"))?;

    mesh_from_primitive(&primitive, buffers)
}

/// Decode the first mesh of an in-memory `.glb` or self-contained `.gltf`
///
/// External buffer URIs cannot be resolved from a byte slice; use
/// [`read_gltf`] for files that reference sibling `.bin` files.
pub fn decode_gltf(bytes: &[u8]) -> ForgeResult<Mesh> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    let mesh = first_mesh(&document, &buffers)?;
    debug!(
        "decoded glTF mesh: {} vertices, {} triangles, {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.attributes()
    );
    Ok(mesh)
}

/// Load the first primitive of the first mesh of a `.gltf`/`.glb` file
pub fn read_gltf(path: impl AsRef<Path>) -> ForgeResult<Mesh> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;
    let mesh = first_mesh(&document, &buffers)?;

    info!(
        "Loaded glTF {}: {} vertices, {} triangles, {}",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.attributes()
    );
    Ok(mesh)
}

/// Load the first primitive of every mesh in a `.gltf`/`.glb` file
pub fn read_all_meshes(path: impl AsRef<Path>) -> ForgeResult<Vec<Mesh>> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;

    let mut meshes = Vec::with_capacity(document.meshes().len());
    for mesh in document.meshes() {
        let primitive = mesh.primitives().next().ok_or_else(|| {
            ForgeError::invalid_operation(format!(
                "mesh {} has no primitives",
                mesh.name().unwrap_or("<unnamed>")
            ))
        })?;
        meshes.push(mesh_from_primitive(&primitive, &buffers)?);
    }

    if meshes.is_empty() {
        return Err(ForgeError::invalid_operation("no meshes found in glTF"));
    }

    info!("Loaded {} meshes from {}", meshes.len(), path.display());
    Ok(meshes)
}
