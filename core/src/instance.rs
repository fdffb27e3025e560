//! Instance merging
//!
//! Replicates one source mesh at many transforms and merges the copies into a
//! single contiguous mesh, or concatenates unrelated meshes with [`combine`].
//!
//! For instance `i` and source vertex `j` the output vertex sits at `i * N + j`
//! and triangle indices of instance `i` are offset by `i * N`, so winding is
//! preserved. Normals and tangent directions are rotated only; scale is never
//! applied to them, which is exact for uniform scale only.

use glam::{Quat, Vec2, Vec3, Vec4};
use tracing::debug;

use crate::error::{ForgeError, ForgeResult, ensure_indexable};
use crate::math::Transform;
use crate::mesh::Mesh;

/// Copy `mesh` to every position, optionally rotating each copy
///
/// Without `rotations` the copies are translated only.
///
/// # Errors
/// `InvalidParameter` if `rotations` has a different length than `positions`
/// or the merged vertex count overflows `u32` indices. `InvalidOperation` if
/// the source mesh breaks the channel-length or index-range invariants.
pub fn copy_to_points(
    mesh: &Mesh,
    positions: &[Vec3],
    rotations: Option<&[Quat]>,
) -> ForgeResult<Mesh> {
    if let Some(rotations) = rotations.filter(|r| r.len() != positions.len()) {
        return Err(ForgeError::invalid_parameter(format!(
            "{} rotations supplied for {} positions",
            rotations.len(),
            positions.len()
        )));
    }

    replicate(mesh, positions.len(), |i| match rotations {
        Some(rotations) => Transform::from_position_rotation(positions[i], rotations[i]),
        None => Transform::from_position(positions[i]),
    })
}

/// Copy `mesh` once per transform (scale, then rotate, then translate)
///
/// # Errors
/// Same as [`copy_to_points`], minus the rotation-length check.
pub fn copy_to_transforms(mesh: &Mesh, transforms: &[Transform]) -> ForgeResult<Mesh> {
    replicate(mesh, transforms.len(), |i| transforms[i])
}

/// Output with every channel the source has, each allocated for `capacity` vertices
fn with_layout_of(source: &Mesh, capacity: usize, index_capacity: usize) -> Mesh {
    Mesh {
        vertices: Vec::with_capacity(capacity),
        normals: source.normals.as_ref().map(|_| Vec::with_capacity(capacity)),
        uvs0: source.uvs0.as_ref().map(|_| Vec::with_capacity(capacity)),
        uvs1: source.uvs1.as_ref().map(|_| Vec::with_capacity(capacity)),
        colors: source.colors.as_ref().map(|_| Vec::with_capacity(capacity)),
        tangents: source.tangents.as_ref().map(|_| Vec::with_capacity(capacity)),
        triangles: Vec::with_capacity(index_capacity),
    }
}

fn extend_copied<T: Copy>(target: &mut Option<Vec<T>>, source: &Option<Vec<T>>) {
    if let (Some(target), Some(source)) = (target, source) {
        target.extend_from_slice(source);
    }
}

fn replicate(
    mesh: &Mesh,
    count: usize,
    transform_at: impl Fn(usize) -> Transform,
) -> ForgeResult<Mesh> {
    mesh.validate()?;

    let n = mesh.vertex_count();
    let total = (n as u64).checked_mul(count as u64).ok_or_else(|| {
        ForgeError::invalid_parameter(format!("{count} instances of {n} vertices overflow"))
    })?;
    ensure_indexable("instance merge", total)?;

    let mut merged = with_layout_of(mesh, n * count, mesh.triangles.len() * count);

    for i in 0..count {
        let transform = transform_at(i);
        let offset = (i * n) as u32;

        merged
            .vertices
            .extend(mesh.vertices.iter().map(|&v| transform.apply_point(v)));

        if let (Some(out), Some(normals)) = (&mut merged.normals, &mesh.normals) {
            out.extend(normals.iter().map(|&normal| transform.apply_normal(normal)));
        }
        if let (Some(out), Some(tangents)) = (&mut merged.tangents, &mesh.tangents) {
            out.extend(tangents.iter().map(|&tangent| {
                transform
                    .apply_normal(tangent.truncate())
                    .extend(tangent.w)
            }));
        }
        extend_copied(&mut merged.uvs0, &mesh.uvs0);
        extend_copied(&mut merged.uvs1, &mesh.uvs1);
        extend_copied(&mut merged.colors, &mesh.colors);

        merged
            .triangles
            .extend(mesh.triangles.iter().map(|&index| index + offset));
    }

    debug!(
        "merged {} instances of {} vertices into {} vertices, {} triangles",
        count,
        n,
        merged.vertex_count(),
        merged.triangle_count()
    );
    Ok(merged)
}

/// Append `source` channel data, or `fill` when the input lacks the channel
fn extend_or_pad<T: Copy>(
    target: &mut Option<Vec<T>>,
    source: &Option<Vec<T>>,
    len: usize,
    fill: T,
) {
    if let Some(target) = target {
        match source {
            Some(values) => target.extend_from_slice(values),
            None => target.resize(target.len() + len, fill),
        }
    }
}

/// Combine multiple meshes into one
///
/// Concatenates vertex and index data, re-basing each mesh's indices. A
/// channel is present in the output if any input has it; inputs without it
/// are padded with zero normals/UVs/tangents and white colors.
///
/// # Example
/// ```no_run
/// use meshforge_core::{Mesh, instance, procedural};
///
/// let cube: Mesh = procedural::generate_cube(1.0)?;
/// let ball: Mesh = procedural::generate_sphere(0.5, 8, 4)?;
/// let combined = instance::combine(&[&cube, &ball])?;
/// # Ok::<(), meshforge_core::ForgeError>(())
/// ```
pub fn combine(meshes: &[&Mesh]) -> ForgeResult<Mesh> {
    for mesh in meshes {
        mesh.validate()?;
    }

    let total_vertices: u64 = meshes.iter().map(|m| m.vertex_count() as u64).sum();
    let total_vertices = ensure_indexable("combine", total_vertices)? as usize;
    let total_indices: usize = meshes.iter().map(|m| m.triangles.len()).sum();

    let present = |has: fn(&Mesh) -> bool| meshes.iter().any(|m| has(m));
    let mut result = Mesh {
        vertices: Vec::with_capacity(total_vertices),
        normals: present(|m| m.normals.is_some()).then(|| Vec::with_capacity(total_vertices)),
        uvs0: present(|m| m.uvs0.is_some()).then(|| Vec::with_capacity(total_vertices)),
        uvs1: present(|m| m.uvs1.is_some()).then(|| Vec::with_capacity(total_vertices)),
        colors: present(|m| m.colors.is_some()).then(|| Vec::with_capacity(total_vertices)),
        tangents: present(|m| m.tangents.is_some()).then(|| Vec::with_capacity(total_vertices)),
        triangles: Vec::with_capacity(total_indices),
    };

    for mesh in meshes {
        let offset = result.vertices.len() as u32;
        let len = mesh.vertex_count();

        result.vertices.extend_from_slice(&mesh.vertices);
        extend_or_pad(&mut result.normals, &mesh.normals, len, Vec3::ZERO);
        extend_or_pad(&mut result.uvs0, &mesh.uvs0, len, Vec2::ZERO);
        extend_or_pad(&mut result.uvs1, &mesh.uvs1, len, Vec2::ZERO);
        extend_or_pad(&mut result.colors, &mesh.colors, len, Vec4::ONE);
        extend_or_pad(&mut result.tangents, &mesh.tangents, len, Vec4::ZERO);

        result
            .triangles
            .extend(mesh.triangles.iter().map(|&index| index + offset));
    }

    debug!(
        "combined {} meshes into {} vertices",
        meshes.len(),
        result.vertex_count()
    );
    Ok(result)
}
