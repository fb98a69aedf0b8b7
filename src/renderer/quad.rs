//! Instance record for textured quads

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::TextureId;

/// One textured quad, laid out for direct upload into an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    /// Column-major world matrix
    pub transform: [[f32; 4]; 4],
    pub texture: u32,
    pub _pad: [u32; 3],
}

impl QuadInstance {
    pub fn new(transform: &Mat4, texture: TextureId) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            texture: texture.0,
            _pad: [0; 3],
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }

    pub fn texture(&self) -> TextureId {
        TextureId(self.texture)
    }

    /// Byte view of a batch of instances
    pub fn as_bytes(instances: &[QuadInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
