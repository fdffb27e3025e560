//! Procedural primitives with UV mapping and normals

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{ForgeResult, ensure_at_least, ensure_indexable, ensure_positive};
use crate::procedural::types::MeshBuilderUV;

/// Which way the normals of a grass blade point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BladeFacing {
    /// All normals +Y, the blade's flat face
    #[default]
    Forward,
    /// All normals +Z, along the blade; lights a field of grass like the ground
    Up,
}

impl BladeFacing {
    fn normal(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::Y,
            Self::Up => Vec3::Z,
        }
    }
}

/// Generate a single grass blade of unit length along +Z
///
/// Rows of two vertices sit at `z = i / segments` for `i < segments`, closed by
/// a tip vertex at `(0, 0, 1)`. UVs follow the positions: `u = 0.5 ∓ width/2`,
/// `v = z`, tip `(0.5, 1)`.
///
/// # Arguments
/// * `segments` - Rows along the blade (min 1); the last row tapers to the tip
/// * `width` - Blade width at the base (> 0.0)
/// * `facing` - Normal direction shared by every vertex
pub fn generate_blade<M: MeshBuilderUV>(
    segments: u32,
    width: f32,
    facing: BladeFacing,
) -> ForgeResult<M> {
    ensure_at_least("blade segments", segments, 1)?;
    ensure_positive("blade width", width)?;

    let vertex_count = ensure_indexable("blade", 2 * u64::from(segments) + 1)?;

    let mut mesh = M::default();
    mesh.reserve(vertex_count as usize, 3 * (2 * segments as usize - 1));

    let half_width = width * 0.5;
    let normal = facing.normal();

    for i in 0..segments {
        let z = i as f32 / segments as f32;
        mesh.add_vertex_uv(
            Vec3::new(-half_width, 0.0, z),
            Vec2::new(0.5 - half_width, z),
            normal,
        );
        mesh.add_vertex_uv(
            Vec3::new(half_width, 0.0, z),
            Vec2::new(0.5 + half_width, z),
            normal,
        );
    }
    let tip = mesh.add_vertex_uv(Vec3::Z, Vec2::new(0.5, 1.0), normal);

    for i in 0..segments - 1 {
        let left = 2 * i;
        let right = left + 1;
        let next_left = left + 2;
        let next_right = left + 3;

        mesh.add_triangle(left, right, next_left);
        mesh.add_triangle(right, next_right, next_left);
    }
    let last_left = 2 * (segments - 1);
    mesh.add_triangle(last_left, last_left + 1, tip);

    debug!(
        "generate_blade: {} segments, width {}, {:?} normals",
        segments, width, facing
    );
    Ok(mesh)
}
