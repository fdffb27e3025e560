//! Complex primitive shapes: sphere, cylinder, cone, torus

use glam::Vec3;
use std::f32::consts::{PI, TAU};
use tracing::debug;

use crate::error::{ForgeResult, ensure_at_least, ensure_indexable, ensure_positive};
use crate::procedural::types::MeshBuilder;

/// Point on a horizontal circle of `radius` at height `y`
#[inline]
fn ring_point(radius: f32, angle: f32, y: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Generate a UV sphere (latitude rings from the +Y pole down to the -Y pole)
///
/// Each ring repeats its first vertex at the seam, so rings hold
/// `width_segments + 1` vertices. The pole rows keep their degenerate
/// triangles to preserve the closed-form index count.
///
/// # Arguments
/// * `radius` - Sphere radius (> 0.0)
/// * `width_segments` - Longitude divisions (min 3)
/// * `height_segments` - Latitude divisions (min 2)
pub fn generate_sphere<M: MeshBuilder>(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> ForgeResult<M> {
    ensure_positive("sphere radius", radius)?;
    ensure_at_least("sphere width_segments", width_segments, 3)?;
    ensure_at_least("sphere height_segments", height_segments, 2)?;

    let vertex_count = ensure_indexable(
        "sphere",
        (u64::from(width_segments) + 1) * (u64::from(height_segments) + 1),
    )?;
    let columns = width_segments + 1;

    let mut mesh = M::default();
    mesh.reserve(
        vertex_count as usize,
        6 * width_segments as usize * height_segments as usize,
    );

    for y in 0..=height_segments {
        let phi = PI * (y as f32 / height_segments as f32);
        let (sin_phi, cos_phi) = phi.sin_cos();

        for x in 0..=width_segments {
            let theta = TAU * (x as f32 / width_segments as f32);
            mesh.add_vertex(ring_point(radius * sin_phi, theta, radius * cos_phi));
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
        "generate_sphere: radius {}, {}x{} segments, {} vertices",
        radius, width_segments, height_segments, vertex_count
    );
    Ok(mesh)
}

/// Generate a capped cylinder along Y, centered at the origin
///
/// Vertex layout: top ring (`segments + 1`, seam repeated), bottom ring
/// (`segments + 1`), top cap center, bottom cap center.
pub fn generate_cylinder<M: MeshBuilder>(
    radius: f32,
    height: f32,
    segments: u32,
) -> ForgeResult<M> {
    ensure_positive("cylinder radius", radius)?;
    ensure_positive("cylinder height", height)?;
    ensure_at_least("cylinder segments", segments, 3)?;

    let vertex_count = ensure_indexable("cylinder", 2 * (u64::from(segments) + 1) + 2)?;
    let ring = segments + 1;

    let mut mesh = M::default();
    mesh.reserve(vertex_count as usize, 12 * segments as usize);

    let half_height = height * 0.5;

    for i in 0..=segments {
        let angle = TAU * (i as f32 / segments as f32);
        mesh.add_vertex(ring_point(radius, angle, half_height));
    }
    for i in 0..=segments {
        let angle = TAU * (i as f32 / segments as f32);
        mesh.add_vertex(ring_point(radius, angle, -half_height));
    }
    let top_center = mesh.add_vertex(Vec3::new(0.0, half_height, 0.0));
    let bottom_center = mesh.add_vertex(Vec3::new(0.0, -half_height, 0.0));

    // Sides
    for i in 0..segments {
        let top_a = i;
        let top_b = i + 1;
        let bottom_a = ring + i;
        let bottom_b = ring + i + 1;

        mesh.add_triangle(top_a, bottom_a, top_b);
        mesh.add_triangle(top_b, bottom_a, bottom_b);
    }

    // Top cap
    for i in 0..segments {
        mesh.add_triangle(top_center, i, i + 1);
    }

    // Bottom cap
    for i in 0..segments {
        mesh.add_triangle(bottom_center, ring + i + 1, ring + i);
    }

    debug!(
        "generate_cylinder: radius {}, height {}, {} segments",
        radius, height, segments
    );
    Ok(mesh)
}

/// Generate a capped cone along Y: apex at `+height/2`, base at `-height/2`
///
/// Vertex layout: apex, base ring (`segments + 1`, seam repeated), base center.
pub fn generate_cone<M: MeshBuilder>(radius: f32, height: f32, segments: u32) -> ForgeResult<M> {
    ensure_positive("cone radius", radius)?;
    ensure_positive("cone height", height)?;
    ensure_at_least("cone segments", segments, 3)?;

    let vertex_count = ensure_indexable("cone", u64::from(segments) + 3)?;

    let mut mesh = M::default();
    mesh.reserve(vertex_count as usize, 6 * segments as usize);

    let half_height = height * 0.5;

    let apex = mesh.add_vertex(Vec3::new(0.0, half_height, 0.0));
    for i in 0..=segments {
        let angle = TAU * (i as f32 / segments as f32);
        mesh.add_vertex(ring_point(radius, angle, -half_height));
    }
    let base_center = mesh.add_vertex(Vec3::new(0.0, -half_height, 0.0));

    // Sides
    for i in 0..segments {
        mesh.add_triangle(apex, 1 + i, 2 + i);
    }

    // Base
    for i in 0..segments {
        mesh.add_triangle(base_center, 2 + i, 1 + i);
    }

    debug!(
        "generate_cone: radius {}, height {}, {} segments",
        radius, height, segments
    );
    Ok(mesh)
}

/// Generate a torus around the Y axis
///
/// The major ring lies in the XZ plane. Neither ring repeats a seam vertex;
/// indices wrap instead, giving exactly `major_segments * minor_segments`
/// vertices.
///
/// # Arguments
/// * `major_radius` - Distance from the center to the middle of the tube (> 0.0)
/// * `minor_radius` - Tube radius (> 0.0)
/// * `major_segments` - Divisions around the ring (min 3)
/// * `minor_segments` - Divisions around the tube (min 3)
pub fn generate_torus<M: MeshBuilder>(
    major_radius: f32,
    minor_radius: f32,
    major_segments: u32,
    minor_segments: u32,
) -> ForgeResult<M> {
    ensure_positive("torus major_radius", major_radius)?;
    ensure_positive("torus minor_radius", minor_radius)?;
    ensure_at_least("torus major_segments", major_segments, 3)?;
    ensure_at_least("torus minor_segments", minor_segments, 3)?;

    let vertex_count = ensure_indexable(
        "torus",
        u64::from(major_segments) * u64::from(minor_segments),
    )?;

    let mut mesh = M::default();
    mesh.reserve(vertex_count as usize, 6 * vertex_count as usize);

    for i in 0..major_segments {
        let major_angle = TAU * (i as f32 / major_segments as f32);
        let (major_sin, major_cos) = major_angle.sin_cos();

        for j in 0..minor_segments {
            let minor_angle = TAU * (j as f32 / minor_segments as f32);
            let (minor_sin, minor_cos) = minor_angle.sin_cos();

            let ring_radius = major_radius + minor_radius * minor_cos;
            mesh.add_vertex(Vec3::new(
                ring_radius * major_cos,
                minor_radius * minor_sin,
                ring_radius * major_sin,
            ));
        }
    }

    for i in 0..major_segments {
        let next_major = (i + 1) % major_segments;

        for j in 0..minor_segments {
            let next_minor = (j + 1) % minor_segments;

            let i0 = i * minor_segments + j;
            let i1 = i * minor_segments + next_minor;
            let i2 = next_major * minor_segments + j;
            let i3 = next_major * minor_segments + next_minor;

            mesh.add_triangle(i0, i2, i1);
            mesh.add_triangle(i1, i2, i3);
        }
    }

    debug!(
        "generate_torus: radii {}/{}, {}x{} segments",
        major_radius, minor_radius, major_segments, minor_segments
    );
    Ok(mesh)
}
