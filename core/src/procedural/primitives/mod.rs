//! Procedural mesh primitives (no UVs)
//!
//! Closed shapes wind every triangle so that `(b - a) × (c - a)` points into
//! the solid, which is outward-facing under the left-handed convention.

mod complex;
mod simple;

pub use complex::{generate_cone, generate_cylinder, generate_sphere, generate_torus};
pub use simple::{generate_cube, generate_plane, generate_pyramid};
