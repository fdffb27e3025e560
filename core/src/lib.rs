//! meshforge core library
//!
//! Procedural mesh generation, instance merging and interchange export:
//! - `procedural`: parametric primitives (plane, cube, sphere, cylinder, cone,
//!   pyramid, torus, grass blade)
//! - `curve`: Bézier sampling, moving frames and tube extrusion
//! - `instance`: replicate a mesh at many transforms and merge into one
//! - `export`: Wavefront OBJ text and glTF 2.0 (`.gltf` / `.glb`)
//!
//! Mesh coordinates are left-handed, Z-up, Y-forward.
//!
//! # Example
//!
//! ```no_run
//! use meshforge_core::{Mesh, export, instance, procedural};
//! use meshforge_core::glam::{Quat, Vec3};
//!
//! let blade: Mesh = procedural::generate_blade(8, 0.04, procedural::BladeFacing::Forward)?;
//! let points = [Vec3::ZERO, Vec3::new(0.2, 0.1, 0.0)];
//! let rotations = [Quat::IDENTITY, Quat::from_rotation_z(1.0)];
//! let merged = instance::copy_to_points(&blade, &points, Some(&rotations))?;
//! export::gltf::write_gltf(&merged, "grass.glb")?;
//! # Ok::<(), meshforge_core::ForgeError>(())
//! ```

pub mod curve;
pub mod error;
pub mod export;
pub mod instance;
pub mod math;
pub mod mesh;
pub mod procedural;

pub use error::{ForgeError, ForgeResult};
pub use math::Transform;
pub use mesh::{Attributes, Mesh};
pub use procedural::{MeshBuilder, MeshBuilderUV};

// Re-export the math library so callers don't need a matching glam version
pub use glam;
