//! OBJ files written to disk

use meshforge_core::export::obj;
use meshforge_core::glam::Vec3;
use meshforge_core::{ForgeError, Mesh, curve, procedural};
use tempfile::tempdir;

fn parse_faces(text: &str) -> Vec<Vec<u32>> {
    text.lines()
        .filter_map(|line| line.strip_prefix("f "))
        .map(|corners| {
            corners
                .split_whitespace()
                .map(|corner| corner.split('/').next().unwrap().parse().unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn bezier_tube_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bezierCurve.obj");
    let points = curve::sample_cubic(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 30.0),
        Vec3::new(70.0, 0.0, 100.0),
        Vec3::new(100.0, 0.0, 100.0),
        7,
    )
    .unwrap();
    let tube = curve::generate_extrusion(&points, 2.0, 8).unwrap();

    obj::write_obj(&tube, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert!(text.starts_with(obj::OBJ_HEADER));
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 56);
    assert!(!text.contains("vn "));
    assert!(!text.contains("vt "));

    let faces = parse_faces(&text);
    assert_eq!(faces.len(), 96);
    // 1-based, never past the last vertex
    assert!(faces.iter().flatten().all(|&i| (1..=56).contains(&i)));
    assert_eq!(faces[0], vec![1, 9, 2]);
}

#[test]
fn blade_file_uses_full_corners() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blade.obj");
    let blade: Mesh = procedural::generate_blade(2, 0.1, procedural::BladeFacing::Up).unwrap();

    obj::write_obj(&blade, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(text.lines().filter(|l| l.starts_with("vn 0 0 1")).count(), 5);
    assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 5);
    assert!(text.contains("f 1/1/1 2/2/2 3/3/3\n"));
}

#[test]
fn overwrite_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube.obj");
    std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

    let cube: Mesh = procedural::generate_cube(2.0).unwrap();
    obj::write_obj(&cube, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), obj::encode_obj(&cube));
}

#[test]
fn unwritable_path_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("x.obj");
    let cube: Mesh = procedural::generate_cube(1.0).unwrap();

    assert!(matches!(obj::write_obj(&cube, &path), Err(ForgeError::Io(_))));
}
