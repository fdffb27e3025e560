//! Curves and curve-swept geometry
//!
//! - `bezier`: quadratic/cubic Bézier evaluation and even sampling
//! - `frame`: per-point orientation frames along a polyline
//! - `extrude`: tube meshes swept along a polyline

mod bezier;
mod extrude;
mod frame;

pub use bezier::{CurvePoint, cubic_bezier, quadratic_bezier, sample_cubic, sample_quadratic};
pub use extrude::{ExtrusionConfig, generate_extrusion, generate_extrusion_with};
pub use frame::{AXIS_SWITCH_THRESHOLD, CurveFrame, FrameMode, compute_frames};
