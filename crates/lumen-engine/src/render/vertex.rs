use bytemuck::{Pod, Zeroable};

/// Index pattern of one quad, relative to its first vertex.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Vertices per quad.
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Batched vertex layout (40 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  uv        [f32; 3]   loc 1   (z = texture slot)
///  offset 24  color     [f32; 4]   loc 2
///
/// Every shader registered with the renderer consumes this layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // uv + slot
        2 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: [f32; 3], uv: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, uv, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Texture slot carried in `uv.z`.
    #[inline]
    pub fn slot(&self) -> f32 {
        self.uv[2]
    }
}
