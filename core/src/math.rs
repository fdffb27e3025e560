//! Affine instance transform on top of glam

use glam::{Quat, Vec3};

/// Position, rotation and scale of one mesh instance
///
/// Points are scaled, then rotated, then translated. Normals are only rotated,
/// which is exact for uniform scale only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Translation only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translation and rotation, unit scale
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Scale, rotate, then translate a point
    #[inline]
    pub fn apply_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.position
    }

    /// Rotate a direction (no scale, no translation)
    #[inline]
    pub fn apply_normal(&self, normal: Vec3) -> Vec3 {
        self.rotation * normal
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
