//! Procedural mesh generation
//!
//! Factory functions for common 3D primitives. Every factory validates its
//! parameters before allocating and fails with `ForgeError::InvalidParameter`
//! on segment counts below the geometric minimum or non-positive sizes.
//!
//! Vertex and index counts are exact functions of the parameters:
//!
//! | Shape | Vertices | Indices |
//! |---|---|---|
//! | plane | (ws+1)(hs+1) | 6·ws·hs |
//! | cube | 24 | 36 |
//! | sphere | (ws+1)(hs+1) | 6·ws·hs |
//! | cylinder | 2(s+1)+2 | 12·s |
//! | cone | s+3 | 6·s |
//! | pyramid | 5 | 18 |
//! | torus | M·m | 6·M·m |
//! | blade | 2s+1 | 3(2s−1) |
//!
//! Only the grass blade carries normals and UVs; the other shapes are
//! positions + triangles.

mod primitives;
mod primitives_uv;
mod types;

#[cfg(test)]
mod tests;

pub use types::{MeshBuilder, MeshBuilderUV};

// Re-export position-only primitives
pub use primitives::{
    generate_cone, generate_cube, generate_cylinder, generate_plane, generate_pyramid,
    generate_sphere, generate_torus,
};

// Re-export UV primitives
pub use primitives_uv::{BladeFacing, generate_blade};
