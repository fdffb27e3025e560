//! Mesh interchange formats
//!
//! - [`obj`]: Wavefront OBJ text (positions, normals, primary UVs)
//! - [`gltf`]: glTF 2.0 as `.gltf` JSON or `.glb` binary, plus loading back

pub mod gltf;
pub mod obj;

pub use gltf::{encode_glb, encode_gltf, write_gltf};
pub use obj::{encode_obj, write_obj};
