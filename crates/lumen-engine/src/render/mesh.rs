use super::vertex::Vertex;

/// Mesh index that points past the vertex list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mesh index {index} is out of range for {vertex_count} vertices")]
pub struct MeshError {
    pub index: u32,
    pub vertex_count: usize,
}

/// Free-form indexed geometry drawn outside the quad batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Fails on the first index that does not name a vertex.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError {
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// Clip-space quad covering the whole target, for presenting an offscreen
    /// target with a custom shader and an identity camera.
    pub fn fullscreen_quad() -> Self {
        let white = [1.0; 4];
        Self {
            vertices: vec![
                Vertex::new([-1.0, -1.0, 0.0], [0.0, 1.0, 0.0], white),
                Vertex::new([1.0, -1.0, 0.0], [1.0, 1.0, 0.0], white),
                Vertex::new([1.0, 1.0, 0.0], [1.0, 0.0, 0.0], white),
                Vertex::new([-1.0, 1.0, 0.0], [0.0, 0.0, 0.0], white),
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_indices_past_the_vertices() {
        let vertices = vec![Vertex::default(); 3];
        assert_eq!(
            Mesh::new(vertices.clone(), vec![0, 1, 3]),
            Err(MeshError { index: 3, vertex_count: 3 })
        );
        assert_eq!(Mesh::new(vertices, vec![0, 1, 2]).map(|m| m.index_count()), Ok(3));
        assert!(Mesh::new(Vec::new(), Vec::new()).is_ok_and(|m| m.is_empty()));
    }

    #[test]
    fn fullscreen_quad_spans_clip_space() {
        let m = Mesh::fullscreen_quad();
        assert_eq!(m.index_count(), 6);
        for axis in 0..2 {
            let min = m.vertices().iter().map(|v| v.position[axis]).fold(f32::MAX, f32::min);
            let max = m.vertices().iter().map(|v| v.position[axis]).fold(f32::MIN, f32::max);
            assert_eq!((min, max), (-1.0, 1.0));
        }
    }

    #[test]
    fn fullscreen_quad_maps_top_left_to_uv_origin() {
        let m = Mesh::fullscreen_quad();
        let top_left = m
            .vertices()
            .iter()
            .find(|v| v.position[0] == -1.0 && v.position[1] == 1.0)
            .unwrap();
        assert_eq!(&top_left.uv[..2], &[0.0, 0.0]);
    }
}
