use glam::Mat4;

use crate::coords::Viewport;
use crate::render::{ShaderId, TargetId};

/// Everything a flush needs to know about the open scene.
///
/// Copied by value: the renderer snapshots the camera's view-projection on
/// `begin_scene`, so later camera edits do not leak into an open scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneContext {
    pub shader: ShaderId,
    pub view_projection: Mat4,
    /// `None` draws into the backend's main target.
    pub target: Option<TargetId>,
    pub viewport: Viewport,
}

impl SceneContext {
    #[inline]
    pub fn new(
        shader: ShaderId,
        view_projection: Mat4,
        target: Option<TargetId>,
        viewport: Viewport,
    ) -> Self {
        Self { shader, view_projection, target, viewport }
    }

    /// Same camera and target, different shader.
    #[inline]
    pub fn with_shader(self, shader: ShaderId) -> Self {
        Self { shader, ..self }
    }
}
