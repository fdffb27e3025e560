//! Tests for procedural primitives

use glam::Vec3;

use super::*;
use crate::error::ForgeError;
use crate::mesh::Mesh;

/// Builder that only counts, to check generators never depend on `Mesh`
#[derive(Default)]
struct CountingBuilder {
    vertices: u32,
    indices: usize,
    max_index: u32,
}

impl MeshBuilder for CountingBuilder {
    fn add_vertex(&mut self, _position: Vec3) -> u32 {
        self.vertices += 1;
        self.vertices - 1
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices += 3;
        self.max_index = self.max_index.max(i0).max(i1).max(i2);
    }
}

/// Check winding of every non-degenerate triangle against the solid.
///
/// `inside` maps a triangle centroid to a point inside the solid next to it.
/// Faces are wound so `(b - a) × (c - a)` points into the solid.
/// Returns (passed, failed, skipped).
fn verify_winding(mesh: &Mesh, inside: impl Fn(Vec3) -> Vec3) -> (usize, usize, usize) {
    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for [a, b, c] in mesh.triangle_indices() {
        let (a, b, c) = (
            mesh.vertices[a as usize],
            mesh.vertices[b as usize],
            mesh.vertices[c as usize],
        );
        let cross = (b - a).cross(c - a);
        if cross.length_squared() < 1e-12 {
            skipped += 1;
            continue;
        }

        let centroid = (a + b + c) / 3.0;
        if cross.dot(inside(centroid) - centroid) > 0.0 {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    (passed, failed, skipped)
}

fn assert_wound_inward(name: &str, mesh: &Mesh, inside: impl Fn(Vec3) -> Vec3) {
    let (passed, failed, skipped) = verify_winding(mesh, inside);
    assert_eq!(
        failed, 0,
        "{name}: {failed} triangles wound the wrong way ({passed} ok, {skipped} degenerate)"
    );
    assert!(passed > 0, "{name}: no triangles checked");
}

// ============================================================================
// Counts
// ============================================================================

#[test]
fn test_plane_counts() {
    let mesh: Mesh = generate_plane(2.0, 2.0, 10, 10).unwrap();
    assert_eq!(mesh.vertex_count(), 121);
    assert_eq!(mesh.triangles.len(), 600);
    assert!(mesh.validate().is_ok());

    let mesh: Mesh = generate_plane(4.0, 1.0, 3, 1).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangles.len(), 18);
}

#[test]
fn test_plane_layout() {
    let mesh: Mesh = generate_plane(2.0, 4.0, 1, 1).unwrap();
    assert_eq!(mesh.vertices[0], Vec3::new(-1.0, 0.0, 2.0));
    assert_eq!(mesh.vertices[1], Vec3::new(1.0, 0.0, 2.0));
    assert_eq!(mesh.vertices[3], Vec3::new(1.0, 0.0, -2.0));
    assert_eq!(mesh.triangles, vec![0, 2, 1, 1, 2, 3]);
}

#[test]
fn test_cube_counts() {
    let mesh: Mesh = generate_cube(2.0).unwrap();
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangles.len(), 36);
    assert!(mesh.vertices.iter().all(|v| v.abs() == Vec3::ONE));
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_sphere_counts() {
    let mesh: Mesh = generate_sphere(1.0, 32, 16).unwrap();
    assert_eq!(mesh.vertex_count(), 33 * 17);
    assert_eq!(mesh.triangles.len(), 6 * 32 * 16);
    assert!(mesh.validate().is_ok());

    for v in &mesh.vertices {
        assert!((v.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_cylinder_counts() {
    let mesh: Mesh = generate_cylinder(1.0, 2.0, 32).unwrap();
    assert_eq!(mesh.vertex_count(), 68);
    assert_eq!(mesh.triangles.len(), 384);
    assert!(mesh.validate().is_ok());

    assert_eq!(mesh.vertices[66], Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(mesh.vertices[67], Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_cone_counts() {
    let mesh: Mesh = generate_cone(1.0, 2.0, 16).unwrap();
    assert_eq!(mesh.vertex_count(), 19);
    assert_eq!(mesh.triangles.len(), 96);
    assert_eq!(mesh.vertices[0], Vec3::new(0.0, 1.0, 0.0));
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_pyramid_counts() {
    let mesh: Mesh = generate_pyramid(2.0, 2.0).unwrap();
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangles.len(), 18);
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_torus_counts() {
    let mesh: Mesh = generate_torus(1.0, 0.3, 32, 16).unwrap();
    assert_eq!(mesh.vertex_count(), 512);
    assert_eq!(mesh.triangles.len(), 3072);
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_minimum_segment_counts_are_valid() {
    assert!(generate_plane::<Mesh>(1.0, 1.0, 1, 1).is_ok());
    assert!(generate_sphere::<Mesh>(1.0, 3, 2).is_ok());
    assert!(generate_cylinder::<Mesh>(1.0, 1.0, 3).is_ok());
    assert!(generate_cone::<Mesh>(1.0, 1.0, 3).is_ok());
    assert!(generate_torus::<Mesh>(1.0, 0.5, 3, 3).is_ok());
}

#[test]
fn test_generators_are_builder_agnostic() {
    let counted: CountingBuilder = generate_sphere(1.0, 8, 4).unwrap();
    assert_eq!(counted.vertices, 9 * 5);
    assert_eq!(counted.indices, 6 * 8 * 4);
    assert!(counted.max_index < counted.vertices);

    let counted: CountingBuilder = generate_torus(2.0, 0.5, 5, 4).unwrap();
    assert_eq!(counted.vertices, 20);
    assert_eq!(counted.indices, 120);
    assert!(counted.max_index < counted.vertices);
}

#[test]
fn test_generation_is_deterministic() {
    let a: Mesh = generate_torus(1.0, 0.25, 12, 6).unwrap();
    let b: Mesh = generate_torus(1.0, 0.25, 12, 6).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Winding
// ============================================================================

#[test]
fn test_cube_winding() {
    let mesh: Mesh = generate_cube(2.0).unwrap();
    let (passed, failed, skipped) = verify_winding(&mesh, |_| Vec3::ZERO);
    assert_eq!((passed, failed, skipped), (12, 0, 0));
}

#[test]
fn test_sphere_winding() {
    let mesh: Mesh = generate_sphere(1.0, 16, 8).unwrap();
    assert_wound_inward("sphere", &mesh, |_| Vec3::ZERO);
}

#[test]
fn test_cylinder_winding() {
    let mesh: Mesh = generate_cylinder(0.5, 3.0, 12).unwrap();
    assert_wound_inward("cylinder", &mesh, |_| Vec3::ZERO);
}

#[test]
fn test_cone_winding() {
    let mesh: Mesh = generate_cone(1.0, 2.0, 12).unwrap();
    assert_wound_inward("cone", &mesh, |_| Vec3::ZERO);
}

#[test]
fn test_pyramid_winding() {
    let mesh: Mesh = generate_pyramid(2.0, 1.5).unwrap();
    let (passed, failed, _) = verify_winding(&mesh, |_| Vec3::ZERO);
    assert_eq!((passed, failed), (6, 0));
}

#[test]
fn test_torus_winding() {
    let major = 1.0;
    let mesh: Mesh = generate_torus(major, 0.3, 24, 12).unwrap();
    // Nearest point on the tube's center circle
    assert_wound_inward("torus", &mesh, |centroid| {
        Vec3::new(centroid.x, 0.0, centroid.z).normalize() * major
    });
}

#[test]
fn test_plane_faces_up() {
    let mesh: Mesh = generate_plane(2.0, 2.0, 2, 2).unwrap();
    let (passed, failed, _) = verify_winding(&mesh, |c| c - Vec3::Y);
    assert_eq!((passed, failed), (8, 0));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_sizes() {
    assert!(matches!(
        generate_cube::<Mesh>(0.0),
        Err(ForgeError::InvalidParameter(_))
    ));
    assert!(generate_plane::<Mesh>(-1.0, 1.0, 1, 1).is_err());
    assert!(generate_sphere::<Mesh>(0.0, 8, 4).is_err());
    assert!(generate_cylinder::<Mesh>(1.0, 0.0, 8).is_err());
    assert!(generate_cone::<Mesh>(-1.0, 1.0, 8).is_err());
    assert!(generate_pyramid::<Mesh>(1.0, f32::NAN).is_err());
    assert!(generate_torus::<Mesh>(1.0, 0.0, 8, 8).is_err());
}

#[test]
fn test_invalid_segments() {
    assert!(generate_plane::<Mesh>(1.0, 1.0, 0, 1).is_err());
    assert!(generate_plane::<Mesh>(1.0, 1.0, 1, 0).is_err());
    assert!(generate_sphere::<Mesh>(1.0, 2, 4).is_err());
    assert!(generate_sphere::<Mesh>(1.0, 8, 1).is_err());
    assert!(generate_cylinder::<Mesh>(1.0, 1.0, 2).is_err());
    assert!(generate_cone::<Mesh>(1.0, 1.0, 2).is_err());
    assert!(generate_torus::<Mesh>(1.0, 0.5, 2, 8).is_err());
    assert!(generate_torus::<Mesh>(1.0, 0.5, 8, 2).is_err());
}

#[test]
fn test_oversized_grid_is_rejected_before_allocation() {
    let err = generate_plane::<Mesh>(1.0, 1.0, u32::MAX - 1, 4).unwrap_err();
    assert!(matches!(err, ForgeError::InvalidParameter(_)));
}

#[test]
fn test_position_only_shapes_have_no_channels() {
    let mesh: Mesh = generate_cylinder(1.0, 1.0, 8).unwrap();
    assert!(mesh.attributes().is_empty());
}
