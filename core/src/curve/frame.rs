//! Moving frame computation for curve sweeping
//!
//! Each path point gets an orthonormal (tangent, normal, binormal) triple.
//! Two strategies are available:
//! - [`FrameMode::AxisSeeded`]: every frame is built independently from a
//!   world-axis seed. Simple and stateless, but the profile visibly rotates
//!   ("pops") where the tangent crosses [`AXIS_SWITCH_THRESHOLD`].
//! - [`FrameMode::ParallelTransport`]: the first frame is axis-seeded, later
//!   frames carry the previous normal forward so the profile never twists.

use glam::Vec3;
use tracing::warn;

use crate::error::{ForgeError, ForgeResult};

/// `|tangent.x|` at or above which the seed axis switches from world X to world Y
pub const AXIS_SWITCH_THRESHOLD: f32 = 0.9;

/// Strategy for orienting the profile along a path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameMode {
    #[default]
    AxisSeeded,
    ParallelTransport,
}

/// A reference frame at a point on a curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveFrame {
    /// Forward along the curve
    pub tangent: Vec3,
    /// Profile X axis
    pub normal: Vec3,
    /// Profile Y axis
    pub binormal: Vec3,
}

impl CurveFrame {
    /// All-zero frame for a degenerate tangent; profiles collapse onto the path point
    pub const ZERO: Self = Self {
        tangent: Vec3::ZERO,
        normal: Vec3::ZERO,
        binormal: Vec3::ZERO,
    };

    /// Build a frame from a unit tangent using the world-axis seed
    pub fn from_tangent(tangent: Vec3) -> Self {
        let seed = if tangent.x.abs() < AXIS_SWITCH_THRESHOLD {
            Vec3::X
        } else {
            Vec3::Y
        };
        let binormal = tangent.cross(seed).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Offset from the path point to a profile vertex at `angle` on a circle of `radius`
    #[inline]
    pub fn ring_offset(&self, angle: f32, radius: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        self.normal * (cos * radius) + self.binormal * (sin * radius)
    }
}

/// Unit tangent at every path point: one-sided differences at the ends,
/// central differences inside. Zero-length differences give a zero tangent.
fn tangents(points: &[Vec3]) -> Vec<Vec3> {
    let last = points.len() - 1;
    (0..points.len())
        .map(|i| {
            let delta = if i == 0 {
                points[1] - points[0]
            } else if i == last {
                points[last] - points[last - 1]
            } else {
                points[i + 1] - points[i - 1]
            };

            let tangent = delta.normalize_or_zero();
            if tangent == Vec3::ZERO {
                warn!(
                    "curve point {} has a zero-length tangent, its profile collapses",
                    i
                );
            }
            tangent
        })
        .collect()
}

/// Compute one frame per path point
///
/// # Errors
/// `InvalidParameter` if fewer than two points are supplied.
pub fn compute_frames(points: &[Vec3], mode: FrameMode) -> ForgeResult<Vec<CurveFrame>> {
    if points.len() < 2 {
        return Err(ForgeError::invalid_parameter(format!(
            "curve needs at least 2 points, got {}",
            points.len()
        )));
    }

    let tangents = tangents(points);
    let frames = match mode {
        FrameMode::AxisSeeded => tangents
            .into_iter()
            .map(|tangent| {
                if tangent == Vec3::ZERO {
                    CurveFrame::ZERO
                } else {
                    CurveFrame::from_tangent(tangent)
                }
            })
            .collect(),
        FrameMode::ParallelTransport => parallel_transport(&tangents),
    };
    Ok(frames)
}

fn parallel_transport(tangents: &[Vec3]) -> Vec<CurveFrame> {
    let mut frames = Vec::with_capacity(tangents.len());
    let mut previous: Option<CurveFrame> = None;

    for &tangent in tangents {
        if tangent == Vec3::ZERO {
            frames.push(CurveFrame::ZERO);
            continue;
        }

        // Project the previous normal onto the plane of the new tangent
        let transported = previous
            .map(|prev| (prev.normal - tangent * prev.normal.dot(tangent)).normalize_or_zero())
            .filter(|normal| *normal != Vec3::ZERO);

        let frame = match transported {
            Some(normal) => CurveFrame {
                tangent,
                normal,
                binormal: tangent.cross(normal).normalize_or_zero(),
            },
            // First frame, or the path folded back onto the previous normal
            None => CurveFrame::from_tangent(tangent),
        };

        previous = Some(frame);
        frames.push(frame);
    }

    frames
}
