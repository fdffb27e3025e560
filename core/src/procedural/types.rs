//! Procedural mesh builder traits
//!
//! Generators are written against these traits rather than a concrete mesh
//! type. The trait a generator requires states which channels it produces:
//! - `MeshBuilder`: positions and triangles only
//! - `MeshBuilderUV`: positions, UV0 and normals

use glam::{Vec2, Vec3, Vec4};

use crate::mesh::Mesh;

/// Trait for mesh construction - enables generic geometry generation
pub trait MeshBuilder: Default {
    /// Add a vertex with a position only, returning its index
    fn add_vertex(&mut self, position: Vec3) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);

    /// Reserve room for an exact vertex/index count (generators know it up front)
    fn reserve(&mut self, _vertices: usize, _indices: usize) {}
}

/// Trait extension for meshes carrying UV0 and normals
pub trait MeshBuilderUV: MeshBuilder {
    /// Add a vertex with position, UV coordinates and normal, returning its index
    fn add_vertex_uv(&mut self, position: Vec3, uv: Vec2, normal: Vec3) -> u32;
}

impl Mesh {
    /// Append defaults to every present optional channel except `skip_surface`
    /// (normals + uvs0), keeping all channels N long.
    fn pad_channels(&mut self, skip_surface: bool) {
        if !skip_surface {
            if let Some(normals) = &mut self.normals {
                normals.push(Vec3::ZERO);
            }
            if let Some(uvs) = &mut self.uvs0 {
                uvs.push(Vec2::ZERO);
            }
        }
        if let Some(uvs) = &mut self.uvs1 {
            uvs.push(Vec2::ZERO);
        }
        if let Some(colors) = &mut self.colors {
            colors.push(Vec4::ONE);
        }
        if let Some(tangents) = &mut self.tangents {
            tangents.push(Vec4::ZERO);
        }
    }
}

impl MeshBuilder for Mesh {
    fn add_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.pad_channels(false);
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push(i0);
        self.triangles.push(i1);
        self.triangles.push(i2);
    }

    fn reserve(&mut self, vertices: usize, indices: usize) {
        self.vertices.reserve(vertices);
        self.triangles.reserve(indices);
    }
}

impl MeshBuilderUV for Mesh {
    fn add_vertex_uv(&mut self, position: Vec3, uv: Vec2, normal: Vec3) -> u32 {
        let index = self.vertices.len();
        self.vertices.push(position);

        // First UV vertex on a bare mesh backfills the channel for earlier vertices
        self.normals
            .get_or_insert_with(|| vec![Vec3::ZERO; index])
            .push(normal);
        self.uvs0
            .get_or_insert_with(|| vec![Vec2::ZERO; index])
            .push(uv);
        self.pad_channels(true);

        index as u32
    }
}
