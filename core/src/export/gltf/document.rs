//! glTF document construction

use std::collections::BTreeMap;

use gltf_json as json;
use gltf_json::validation::Checked::Valid;

use super::buffer::AccessorIndex;

/// Accessor indices for one exported mesh
#[derive(Debug, Clone)]
pub struct MeshAccessors {
    pub positions: AccessorIndex,
    pub normals: Option<AccessorIndex>,
    pub uvs0: Option<AccessorIndex>,
    pub uvs1: Option<AccessorIndex>,
    pub colors: Option<AccessorIndex>,
    pub tangents: Option<AccessorIndex>,
    pub indices: Option<AccessorIndex>,
}

/// Builder for complete glTF documents
#[derive(Default)]
pub struct GltfBuilder {
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    scenes: Vec<json::Scene>,
    buffer_byte_length: u64,
    buffer_uri: Option<String>,
}

impl GltfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set buffer byte length (required before building)
    pub fn buffer_byte_length(mut self, length: u64) -> Self {
        self.buffer_byte_length = length;
        self
    }

    /// Reference the buffer by URI instead of the GLB binary chunk
    pub fn buffer_uri(mut self, uri: String) -> Self {
        self.buffer_uri = Some(uri);
        self
    }

    /// Add a mesh with a single triangle-list primitive
    pub fn add_mesh_from_accessors(mut self, name: &str, accessors: &MeshAccessors) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            accessors.positions.as_json_index(),
        );

        let optional = [
            (json::mesh::Semantic::Normals, accessors.normals),
            (json::mesh::Semantic::TexCoords(0), accessors.uvs0),
            (json::mesh::Semantic::TexCoords(1), accessors.uvs1),
            (json::mesh::Semantic::Colors(0), accessors.colors),
            (json::mesh::Semantic::Tangents, accessors.tangents),
        ];
        for (semantic, accessor) in optional {
            if let Some(accessor) = accessor {
                attributes.insert(Valid(semantic), accessor.as_json_index());
            }
        }

        let primitive = json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: accessors.indices.map(|i| i.as_json_index()),
            material: None,
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        };

        self.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            primitives: vec![primitive],
            weights: None,
        });

        self
    }

    /// Add a node instancing the last added mesh at the origin
    pub fn add_mesh_node(mut self, name: &str) -> Self {
        let mesh = self
            .meshes
            .len()
            .checked_sub(1)
            .map(|i| json::Index::new(i as u32));

        self.nodes.push(json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh,
            name: Some(name.to_string()),
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        });
        self
    }

    /// Add a scene
    pub fn add_scene(mut self, name: &str, root_nodes: &[u32]) -> Self {
        self.scenes.push(json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            nodes: root_nodes.iter().map(|n| json::Index::new(*n)).collect(),
        });
        self
    }

    /// Build final glTF Root (requires buffer views and accessors from BufferBuilder)
    pub fn build(
        self,
        buffer_views: &[json::buffer::View],
        accessors: &[json::Accessor],
        generator: &str,
    ) -> json::Root {
        let buffers = vec![json::Buffer {
            byte_length: self.buffer_byte_length.into(),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: self.buffer_uri,
        }];

        json::Root {
            accessors: accessors.to_vec(),
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(generator.to_string()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers,
            buffer_views: buffer_views.to_vec(),
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: Vec::new(),
            extras: Default::default(),
            images: Vec::new(),
            materials: Vec::new(),
            meshes: self.meshes,
            nodes: self.nodes,
            samplers: Vec::new(),
            scene: if self.scenes.is_empty() {
                None
            } else {
                Some(json::Index::new(0))
            },
            scenes: self.scenes,
            skins: Vec::new(),
            textures: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::gltf::buffer::BufferBuilder;
    use glam::Vec3;

    #[test]
    fn test_gltf_builder_basic() {
        let mut buffer = BufferBuilder::new();
        let accessors = MeshAccessors {
            positions: buffer.pack_positions(&[Vec3::ZERO, Vec3::X, Vec3::Y]),
            normals: None,
            uvs0: None,
            uvs1: None,
            colors: None,
            tangents: None,
            indices: Some(buffer.pack_indices(&[0, 1, 2])),
        };

        let root = GltfBuilder::new()
            .buffer_byte_length(buffer.data().len() as u64)
            .add_mesh_from_accessors("Triangle", &accessors)
            .add_mesh_node("Triangle")
            .add_scene("Scene", &[0])
            .build(buffer.views(), buffer.accessors(), "test");

        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.nodes.len(), 1);
        assert_eq!(root.nodes[0].mesh.map(|m| m.value()), Some(0));
        assert_eq!(root.scenes.len(), 1);
        assert_eq!(root.scene.map(|s| s.value()), Some(0));
        assert_eq!(root.asset.version, "2.0");
        assert_eq!(root.meshes[0].primitives[0].attributes.len(), 1);
    }
}
