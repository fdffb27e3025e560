//! Simple primitive shapes: plane, cube, pyramid

use glam::Vec3;
use tracing::debug;

use crate::error::{ForgeResult, ensure_at_least, ensure_indexable, ensure_positive};
use crate::procedural::types::MeshBuilder;

/// Generate a subdivided plane in the XZ plane (Y = 0)
///
/// Rows run from `+height/2` down to `-height/2` along Z, columns from
/// `-width/2` to `+width/2` along X.
///
/// # Arguments
/// * `width` - Extent along X (> 0.0)
/// * `height` - Extent along Z (> 0.0)
/// * `width_segments` - Columns (min 1)
/// * `height_segments` - Rows (min 1)
pub fn generate_plane<M: MeshBuilder>(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> ForgeResult<M> {
    ensure_positive("plane width", width)?;
    ensure_positive("plane height", height)?;
    ensure_at_least("plane width_segments", width_segments, 1)?;
    ensure_at_least("plane height_segments", height_segments, 1)?;

    let vertex_count = ensure_indexable(
        "plane",
        (u64::from(width_segments) + 1) * (u64::from(height_segments) + 1),
    )?;
    let columns = width_segments + 1;

    let mut mesh = M::default();
    mesh.reserve(
        vertex_count as usize,
        6 * width_segments as usize * height_segments as usize,
    );

    let half_width = width * 0.5;
    let half_height = height * 0.5;

    for y in 0..=height_segments {
        let z = half_height - (y as f32 / height_segments as f32) * height;
        for x in 0..=width_segments {
            let px = -half_width + (x as f32 / width_segments as f32) * width;
            mesh.add_vertex(Vec3::new(px, 0.0, z));
        }
    }

    for y in 0..height_segments {
        for x in 0..width_segments {
            let a = y * columns + x;
            let b = a + 1;
            let c = a + columns;
            let d = c + 1;

            mesh.add_triangle(a, c, b);
            mesh.add_triangle(b, c, d);
        }
    }

    debug!(
        "generate_plane: {}x{} segments, {} vertices",
        width_segments, height_segments, vertex_count
    );
    Ok(mesh)
}

/// Generate an axis-aligned cube centered at the origin
///
/// 24 vertices (4 per face) so faces never share corners, which keeps the
/// mesh ready for flat per-face attributes.
pub fn generate_cube<M: MeshBuilder>(size: f32) -> ForgeResult<M> {
    ensure_positive("cube size", size)?;

    let mut mesh = M::default();
    mesh.reserve(24, 36);

    let h = size * 0.5;
    let faces: [[Vec3; 4]; 6] = [
        // Front (Z+)
        [
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ],
        // Back (Z-)
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(h, -h, -h),
        ],
        // Top (Y+)
        [
            Vec3::new(-h, h, -h),
            Vec3::new(-h, h, h),
            Vec3::new(h, h, h),
            Vec3::new(h, h, -h),
        ],
        // Bottom (Y-)
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, -h, h),
            Vec3::new(-h, -h, h),
        ],
        // Right (X+)
        [
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(h, h, h),
            Vec3::new(h, -h, h),
        ],
        // Left (X-)
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(-h, h, h),
            Vec3::new(-h, h, -h),
        ],
    ];

    for corners in faces {
        let base = mesh.add_vertex(corners[0]);
        for &corner in &corners[1..] {
            mesh.add_vertex(corner);
        }
        mesh.add_triangle(base, base + 2, base + 1);
        mesh.add_triangle(base, base + 3, base + 2);
    }

    debug!("generate_cube: size {}", size);
    Ok(mesh)
}

/// Generate a square pyramid: base on `y = -height/2`, apex at `y = +height/2`
pub fn generate_pyramid<M: MeshBuilder>(base_size: f32, height: f32) -> ForgeResult<M> {
    ensure_positive("pyramid base_size", base_size)?;
    ensure_positive("pyramid height", height)?;

    let mut mesh = M::default();
    mesh.reserve(5, 18);

    let hs = base_size * 0.5;
    let hh = height * 0.5;

    let c0 = mesh.add_vertex(Vec3::new(-hs, -hh, -hs));
    let c1 = mesh.add_vertex(Vec3::new(hs, -hh, -hs));
    let c2 = mesh.add_vertex(Vec3::new(hs, -hh, hs));
    let c3 = mesh.add_vertex(Vec3::new(-hs, -hh, hs));
    let apex = mesh.add_vertex(Vec3::new(0.0, hh, 0.0));

    // Base
    mesh.add_triangle(c0, c2, c1);
    mesh.add_triangle(c0, c3, c2);

    // Sides
    mesh.add_triangle(c0, c1, apex);
    mesh.add_triangle(c1, c2, apex);
    mesh.add_triangle(c2, c3, apex);
    mesh.add_triangle(c3, c0, apex);

    debug!("generate_pyramid: base {} height {}", base_size, height);
    Ok(mesh)
}
