//! Binary buffer packing with automatic alignment and accessor creation
//!
//! Every pack call appends one tightly packed little-endian view to the
//! shared buffer, records a matching accessor, and pads the buffer back to a
//! 4-byte boundary.

use glam::{Vec2, Vec3, Vec4};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Largest index that may be stored as `UNSIGNED_SHORT` (65535 is reserved)
pub const MAX_U16_INDEX: u32 = u16::MAX as u32 - 1;

/// Accessor index returned by buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorIndex(pub u32);

impl AccessorIndex {
    pub fn as_json_index(&self) -> json::Index<json::Accessor> {
        json::Index::new(self.0)
    }
}

/// Compute the axis-aligned bounds of a position set
pub fn compute_bounds(positions: &[Vec3]) -> (Vec3, Vec3) {
    positions.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(min, max), &p| (min.min(p), max.max(p)),
    )
}

/// Align buffer to 4-byte boundary
pub fn align_buffer(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

fn json_array(values: &[f32]) -> json::Value {
    json::Value::Array(values.iter().copied().map(json::Value::from).collect())
}

/// Builder for the single binary buffer of an exported document
#[derive(Default)]
pub struct BufferBuilder {
    buffer: Vec<u8>,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the binary buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer views
    pub fn views(&self) -> &[json::buffer::View] {
        &self.views
    }

    /// Get the accessors
    pub fn accessors(&self) -> &[json::Accessor] {
        &self.accessors
    }

    /// Take the packed bytes, leaving the views and accessors in place
    pub fn take_data(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Record a view over `buffer[offset..]` plus an accessor reading it
    fn push_accessor(
        &mut self,
        offset: usize,
        count: usize,
        component_type: json::accessor::ComponentType,
        type_: json::accessor::Type,
        target: json::buffer::Target,
        bounds: Option<(&[f32], &[f32])>,
    ) -> AccessorIndex {
        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: (self.buffer.len() - offset).into(),
            byte_offset: Some((offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: Some(Valid(target)),
        });

        let accessor_idx = self.accessors.len() as u32;
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(self.views.len() as u32 - 1)),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component_type)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min: bounds.map(|(min, _)| json_array(min)),
            max: bounds.map(|(_, max)| json_array(max)),
            name: None,
            normalized: false,
            sparse: None,
        });

        align_buffer(&mut self.buffer);
        AccessorIndex(accessor_idx)
    }

    fn extend_f32(&mut self, values: impl IntoIterator<Item = f32>) {
        for value in values {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    }

    /// Pack positions with min/max bounds (required by glTF for POSITION)
    pub fn pack_positions(&mut self, positions: &[Vec3]) -> AccessorIndex {
        let offset = self.buffer.len();
        self.extend_f32(positions.iter().flat_map(|p| p.to_array()));

        let (min, max) = compute_bounds(positions);
        self.push_accessor(
            offset,
            positions.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            json::buffer::Target::ArrayBuffer,
            Some((&min.to_array(), &max.to_array())),
        )
    }

    /// Pack Vec3 data (normals)
    pub fn pack_vec3(&mut self, data: &[Vec3]) -> AccessorIndex {
        let offset = self.buffer.len();
        self.extend_f32(data.iter().flat_map(|v| v.to_array()));
        self.push_accessor(
            offset,
            data.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            json::buffer::Target::ArrayBuffer,
            None,
        )
    }

    /// Pack Vec2 data (UVs)
    pub fn pack_vec2(&mut self, data: &[Vec2]) -> AccessorIndex {
        let offset = self.buffer.len();
        self.extend_f32(data.iter().flat_map(|v| v.to_array()));
        self.push_accessor(
            offset,
            data.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec2,
            json::buffer::Target::ArrayBuffer,
            None,
        )
    }

    /// Pack Vec4 data (colors, tangents)
    pub fn pack_vec4(&mut self, data: &[Vec4]) -> AccessorIndex {
        let offset = self.buffer.len();
        self.extend_f32(data.iter().flat_map(|v| v.to_array()));
        self.push_accessor(
            offset,
            data.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec4,
            json::buffer::Target::ArrayBuffer,
            None,
        )
    }

    /// Pack triangle indices, narrowing to u16 when every index fits
    pub fn pack_indices(&mut self, indices: &[u32]) -> AccessorIndex {
        let offset = self.buffer.len();
        let max_index = indices.iter().copied().max().unwrap_or(0);

        let component_type = if max_index <= MAX_U16_INDEX {
            for &idx in indices {
                self.buffer.extend_from_slice(&(idx as u16).to_le_bytes());
            }
            json::accessor::ComponentType::U16
        } else {
            for &idx in indices {
                self.buffer.extend_from_slice(&idx.to_le_bytes());
            }
            json::accessor::ComponentType::U32
        };

        self.push_accessor(
            offset,
            indices.len(),
            component_type,
            json::accessor::Type::Scalar,
            json::buffer::Target::ElementArrayBuffer,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_type(accessor: &json::Accessor) -> json::accessor::ComponentType {
        match accessor.component_type {
            Valid(json::accessor::GenericComponentType(ty)) => ty,
            _ => panic!("invalid component type"),
        }
    }

    #[test]
    fn test_compute_bounds() {
        let positions = [Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0)];
        let (min, max) = compute_bounds(&positions);
        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_align_buffer() {
        let mut buffer = vec![1, 2, 3];
        align_buffer(&mut buffer);
        assert_eq!(buffer, vec![1, 2, 3, 0]);

        let mut buffer = vec![1, 2, 3, 4];
        align_buffer(&mut buffer);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_positions_little_endian_with_bounds() {
        let mut builder = BufferBuilder::new();
        let idx = builder.pack_positions(&[Vec3::new(1.0, -2.0, 0.5)]);

        assert_eq!(idx, AccessorIndex(0));
        assert_eq!(builder.data().len(), 12);
        assert_eq!(&builder.data()[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&builder.data()[4..8], &(-2.0f32).to_le_bytes());

        let accessor = &builder.accessors()[0];
        assert_eq!(accessor.min, Some(json_array(&[1.0, -2.0, 0.5])));
        assert_eq!(accessor.max, Some(json_array(&[1.0, -2.0, 0.5])));
    }

    #[test]
    fn test_views_stay_aligned() {
        let mut builder = BufferBuilder::new();
        builder.pack_indices(&[0, 1, 2]);
        builder.pack_vec2(&[Vec2::ONE; 3]);

        // 3 u16 indices = 6 bytes, padded to 8
        let second = &builder.views()[1];
        assert_eq!(second.byte_offset.map(|o| o.0), Some(8));
        assert_eq!(second.byte_length.0, 24);
        assert_eq!(builder.data().len(), 32);
    }

    #[test]
    fn test_index_width_selection() {
        let mut builder = BufferBuilder::new();
        builder.pack_indices(&[0, 1, MAX_U16_INDEX]);
        builder.pack_indices(&[0, 1, 65_535]);

        assert_eq!(
            component_type(&builder.accessors()[0]),
            json::accessor::ComponentType::U16
        );
        assert_eq!(
            component_type(&builder.accessors()[1]),
            json::accessor::ComponentType::U32
        );
        assert_eq!(builder.views()[1].byte_length.0, 12);
    }
}
