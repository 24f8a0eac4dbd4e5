use super::vertex::{Vertex, QUAD_INDICES, QUAD_VERTEX_COUNT};

/// Quad pushed into a buffer that is already at capacity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("geometry buffer is full ({capacity} quads)")]
pub struct BufferFull {
    pub capacity: usize,
}

/// CPU staging for one batch: vertices and indices of the quads pushed since
/// the last flush.
///
/// Storage is reserved once for `quad_capacity` quads and never grows.
#[derive(Debug, Clone)]
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    quad_capacity: usize,
}

impl GeometryBuffer {
    pub fn new(quad_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quad_capacity * QUAD_VERTEX_COUNT),
            indices: Vec::with_capacity(quad_capacity * QUAD_INDICES.len()),
            quad_capacity,
        }
    }

    /// Appends one quad (corners in winding order) and its six indices.
    pub fn push_quad(&mut self, corners: [Vertex; 4]) -> Result<(), BufferFull> {
        if self.is_full() {
            return Err(BufferFull { capacity: self.quad_capacity });
        }

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        Ok(())
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / QUAD_VERTEX_COUNT
    }

    #[inline]
    pub fn quad_capacity(&self) -> usize {
        self.quad_capacity
    }

    /// Vertex slots reserved on the GPU for one batch.
    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.quad_capacity * QUAD_VERTEX_COUNT
    }

    /// Index slots reserved on the GPU for one batch.
    #[inline]
    pub fn max_indices(&self) -> usize {
        self.quad_capacity * QUAD_INDICES.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.quad_count() >= self.quad_capacity
    }

    /// Pending vertices, in push order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Pending indices, in push order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Drops pending geometry, keeping the reserved storage.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
