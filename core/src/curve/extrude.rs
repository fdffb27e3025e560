//! Tube extrusion: sweep a circular profile along a polyline

use glam::Vec3;
use std::f32::consts::TAU;
use tracing::debug;

use super::frame::{FrameMode, compute_frames};
use crate::error::{ForgeError, ForgeResult, ensure_at_least, ensure_indexable, ensure_positive};
use crate::mesh::Mesh;

/// Configuration for tube extrusion
#[derive(Clone, Debug, PartialEq)]
pub struct ExtrusionConfig {
    /// Profile circle radius
    pub radius: f32,
    /// Vertices per profile ring (min 3)
    pub profile_segments: u32,
    /// How the profile is oriented along the path
    pub frame_mode: FrameMode,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            profile_segments: 8,
            frame_mode: FrameMode::AxisSeeded,
        }
    }
}

impl ExtrusionConfig {
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_segments(mut self, profile_segments: u32) -> Self {
        self.profile_segments = profile_segments;
        self
    }

    #[must_use]
    pub fn with_frame_mode(mut self, frame_mode: FrameMode) -> Self {
        self.frame_mode = frame_mode;
        self
    }
}

/// Sweep a circle of `radius` along `points` using axis-seeded frames
///
/// Shorthand for [`generate_extrusion_with`] with the default frame mode.
pub fn generate_extrusion(
    points: &[Vec3],
    radius: f32,
    profile_segments: u32,
) -> ForgeResult<Mesh> {
    generate_extrusion_with(
        points,
        &ExtrusionConfig {
            radius,
            profile_segments,
            frame_mode: FrameMode::AxisSeeded,
        },
    )
}

/// Sweep a circular profile along `points`
///
/// Produces `points.len() * profile_segments` vertices (ring `i`, vertex `j`
/// at index `i * segments + j`) and two triangles per ring quad. Rings do not
/// repeat a seam vertex and the tube ends are left open. The output carries
/// positions and triangles only.
///
/// # Errors
/// `InvalidParameter` for fewer than 2 points, fewer than 3 profile segments,
/// or a non-positive radius.
pub fn generate_extrusion_with(points: &[Vec3], config: &ExtrusionConfig) -> ForgeResult<Mesh> {
    if points.len() < 2 {
        return Err(ForgeError::invalid_parameter(format!(
            "extrusion path needs at least 2 points, got {}",
            points.len()
        )));
    }
    ensure_at_least("extrusion profile_segments", config.profile_segments, 3)?;
    ensure_positive("extrusion radius", config.radius)?;

    let segments = config.profile_segments;
    let vertex_count = ensure_indexable("extrusion", points.len() as u64 * u64::from(segments))?;

    let frames = compute_frames(points, config.frame_mode)?;

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for (&point, frame) in points.iter().zip(&frames) {
        for j in 0..segments {
            let angle = TAU * (j as f32 / segments as f32);
            vertices.push(point + frame.ring_offset(angle, config.radius));
        }
    }

    let rings = points.len() as u32;
    let mut triangles = Vec::with_capacity(6 * segments as usize * (points.len() - 1));
    for i in 0..rings - 1 {
        let base = i * segments;
        let next = base + segments;

        for j in 0..segments {
            let jn = (j + 1) % segments;

            triangles.extend_from_slice(&[base + j, next + j, base + jn]);
            triangles.extend_from_slice(&[base + jn, next + j, next + jn]);
        }
    }

    debug!(
        "generate_extrusion: {} rings x {} segments, {:?} frames",
        rings, segments, config.frame_mode
    );
    Ok(Mesh::from_geometry(vertices, triangles))
}
