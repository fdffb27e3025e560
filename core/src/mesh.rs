//! Mesh data model
//!
//! A mesh is a set of parallel per-vertex attribute arrays plus a triangle
//! index list. `vertices` defines the vertex count N; every optional channel is
//! either absent or exactly N long, and every index lies in `[0, N)`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::{Vec2, Vec3, Vec4};

use crate::error::{ForgeError, ForgeResult};

/// Presence flags for the optional vertex channels of a [`Mesh`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes(u8);

impl Attributes {
    pub const NONE: Self = Self(0);
    pub const NORMAL: Self = Self(1 << 0);
    pub const UV0: Self = Self(1 << 1);
    pub const UV1: Self = Self(1 << 2);
    pub const COLOR: Self = Self(1 << 3);
    pub const TANGENT: Self = Self(1 << 4);

    /// True if every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Attributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::NORMAL, "NORMAL"),
            (Self::UV0, "UV0"),
            (Self::UV1, "UV1"),
            (Self::COLOR, "COLOR"),
            (Self::TANGENT, "TANGENT"),
        ];
        let mut parts = vec!["POS"];
        parts.extend(
            names
                .iter()
                .filter(|(flag, _)| self.contains(*flag))
                .map(|(_, name)| *name),
        );
        f.write_str(&parts.join("_"))
    }
}

/// Triangle mesh with optional per-vertex channels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (defines the vertex count)
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals
    pub normals: Option<Vec<Vec3>>,
    /// Primary texture coordinates
    pub uvs0: Option<Vec<Vec2>>,
    /// Secondary texture coordinates (e.g. per-instance data after a merge)
    pub uvs1: Option<Vec<Vec2>>,
    /// Linear RGBA vertex colors
    pub colors: Option<Vec<Vec4>>,
    /// Tangent direction in xyz, bitangent handedness (+1/-1) in w
    pub tangents: Option<Vec<Vec4>>,
    /// Triangle list, three indices per triangle
    pub triangles: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and triangles only
    pub fn from_geometry(vertices: Vec<Vec3>, triangles: Vec<u32>) -> Self {
        Self {
            vertices,
            triangles,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Which optional channels are present
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::NONE;
        if self.normals.is_some() {
            attributes |= Attributes::NORMAL;
        }
        if self.uvs0.is_some() {
            attributes |= Attributes::UV0;
        }
        if self.uvs1.is_some() {
            attributes |= Attributes::UV1;
        }
        if self.colors.is_some() {
            attributes |= Attributes::COLOR;
        }
        if self.tangents.is_some() {
            attributes |= Attributes::TANGENT;
        }
        attributes
    }

    /// Check the channel-length and index-range invariants
    pub fn validate(&self) -> ForgeResult<()> {
        let n = self.vertices.len();

        let channel_lengths = [
            ("normals", self.normals.as_ref().map(Vec::len)),
            ("uvs0", self.uvs0.as_ref().map(Vec::len)),
            ("uvs1", self.uvs1.as_ref().map(Vec::len)),
            ("colors", self.colors.as_ref().map(Vec::len)),
            ("tangents", self.tangents.as_ref().map(Vec::len)),
        ];
        for (name, len) in channel_lengths {
            if let Some(len) = len.filter(|&len| len != n) {
                return Err(ForgeError::invalid_operation(format!(
                    "{name} has {len} entries, expected {n}"
                )));
            }
        }

        if self.triangles.len() % 3 != 0 {
            return Err(ForgeError::invalid_operation(format!(
                "triangle index count {} is not a multiple of 3",
                self.triangles.len()
            )));
        }

        if let Some((position, &index)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= n)
        {
            return Err(ForgeError::invalid_operation(format!(
                "triangle index {index} at position {position} is out of range for {n} vertices"
            )));
        }

        Ok(())
    }

    /// Iterate triangles as index triples
    pub fn triangle_indices(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::from_geometry(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2])
    }

    #[test]
    fn test_counts() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
        assert!(Mesh::new().is_empty());
    }

    #[test]
    fn test_attribute_flags() {
        let mut mesh = triangle();
        assert!(mesh.attributes().is_empty());

        mesh.normals = Some(vec![Vec3::Z; 3]);
        mesh.uvs0 = Some(vec![Vec2::ZERO; 3]);
        let attributes = mesh.attributes();
        assert!(attributes.contains(Attributes::NORMAL | Attributes::UV0));
        assert!(!attributes.contains(Attributes::COLOR));
        assert_eq!(attributes.to_string(), "POS_NORMAL_UV0");
    }

    #[test]
    fn test_validate_ok() {
        let mut mesh = triangle();
        mesh.colors = Some(vec![Vec4::ONE; 3]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_channel_length() {
        let mut mesh = triangle();
        mesh.uvs1 = Some(vec![Vec2::ZERO; 2]);
        let err = mesh.validate().unwrap_err();
        assert!(matches!(err, ForgeError::InvalidOperation(_)));
        assert!(err.to_string().contains("uvs1"));
    }

    #[test]
    fn test_validate_index_range() {
        let mut mesh = triangle();
        mesh.triangles = vec![0, 1, 3];
        assert!(mesh.validate().is_err());

        mesh.triangles = vec![0, 1];
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_triangle_indices() {
        let mut mesh = triangle();
        mesh.triangles = vec![0, 1, 2, 2, 1, 0];
        let tris: Vec<[u32; 3]> = mesh.triangle_indices().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 0]]);
    }
}
