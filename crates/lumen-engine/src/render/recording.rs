use crate::paint::Color;
use crate::scene::SceneContext;
use crate::text::GlyphAtlas;

use super::{
    Mesh, RenderBackend, RenderError, ShaderError, ShaderId, TargetError, TargetId, Vertex,
    BATCH_SHADER,
};

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ReserveGeometry { vertices: usize, indices: usize },
    CreateFontShader { shader: ShaderId, layers: u32 },
    BeginScene(SceneContext),
    EndScene(SceneContext),
    WriteGeometry { vertices: Vec<Vertex>, indices: Vec<u32> },
    DrawIndexed { scene: SceneContext, index_count: u32 },
    DrawMesh { scene: SceneContext, index_count: u32 },
    Clear { target: Option<TargetId>, color: Color },
}

/// Backend that draws nothing and remembers every call.
///
/// Handles are validated the same way the GPU backend validates them, so
/// renderer error paths behave identically.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    shader_count: u32,
    target_count: u32,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            // Slot 0 is the built-in batch shader.
            shader_count: BATCH_SHADER.0 + 1,
            target_count: 0,
        }
    }

    /// Registers a stand-in for a user shader.
    pub fn register_shader(&mut self) -> ShaderId {
        let id = ShaderId(self.shader_count);
        self.shader_count += 1;
        id
    }

    /// Registers a stand-in for an offscreen target.
    pub fn register_target(&mut self) -> TargetId {
        let id = TargetId(self.target_count);
        self.target_count += 1;
        id
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Index counts of every batched draw, in order.
    pub fn draw_calls(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::DrawIndexed { index_count, .. } => Some(*index_count),
                _ => None,
            })
            .collect()
    }

    /// Number of batched draws (mesh draws excluded).
    pub fn draw_call_count(&self) -> usize {
        self.draw_calls().len()
    }

    /// Every uploaded vertex, across all batches.
    pub fn uploaded_vertices(&self) -> Vec<Vertex> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::WriteGeometry { vertices, .. } => Some(vertices.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Shaders bound by `BeginScene`, in order.
    pub fn bound_shaders(&self) -> Vec<ShaderId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::BeginScene(scene) => Some(scene.shader),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn reserve_geometry(&mut self, max_vertices: usize, max_indices: usize) {
        self.calls.push(BackendCall::ReserveGeometry {
            vertices: max_vertices,
            indices: max_indices,
        });
    }

    fn create_font_shader(&mut self, atlas: &GlyphAtlas) -> Result<ShaderId, RenderError> {
        let shader = self.register_shader();
        self.calls.push(BackendCall::CreateFontShader {
            shader,
            layers: atlas.layer_count(),
        });
        Ok(shader)
    }

    fn begin_scene(&mut self, scene: &SceneContext) -> Result<(), RenderError> {
        if scene.shader.0 >= self.shader_count {
            return Err(ShaderError::Unknown(scene.shader).into());
        }
        if let Some(target) = scene.target.filter(|t| t.0 >= self.target_count) {
            return Err(TargetError::Unknown(target).into());
        }
        self.calls.push(BackendCall::BeginScene(*scene));
        Ok(())
    }

    fn end_scene(&mut self, scene: &SceneContext) {
        self.calls.push(BackendCall::EndScene(*scene));
    }

    fn write_geometry(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.calls.push(BackendCall::WriteGeometry {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
    }

    fn draw_indexed(&mut self, scene: &SceneContext, index_count: u32) {
        self.calls.push(BackendCall::DrawIndexed { scene: *scene, index_count });
    }

    fn draw_mesh(&mut self, scene: &SceneContext, mesh: &Mesh) {
        self.calls.push(BackendCall::DrawMesh {
            scene: *scene,
            index_count: mesh.index_count(),
        });
    }

    fn clear(&mut self, target: Option<TargetId>, color: Color) -> Result<(), RenderError> {
        if let Some(target) = target.filter(|t| t.0 >= self.target_count) {
            return Err(TargetError::Unknown(target).into());
        }
        self.calls.push(BackendCall::Clear { target, color });
        Ok(())
    }
}
