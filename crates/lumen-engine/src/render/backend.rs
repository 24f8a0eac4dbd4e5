use crate::paint::Color;
use crate::scene::SceneContext;
use crate::text::GlyphAtlas;

use super::{Mesh, RenderError, ShaderId, TargetId, Vertex};

/// GPU seam under [`Renderer2D`](super::Renderer2D).
///
/// The renderer owns batching and scene state; a backend only executes what it
/// is told. Calls arrive in submission order:
///
/// - `begin_scene` binds the scene's shader, target and uniforms. Unknown
///   handles are rejected here so later calls can assume they resolve.
/// - `write_geometry` replaces the pending batch; `draw_indexed` draws the
///   first `index_count` indices of it.
/// - `end_scene` unbinds. Nothing is drawn until the next `begin_scene`.
pub trait RenderBackend {
    /// Reserves batch storage once, before any scene is opened.
    fn reserve_geometry(&mut self, max_vertices: usize, max_indices: usize);

    /// Uploads the glyph atlas and registers the distance-field font shader.
    fn create_font_shader(&mut self, atlas: &GlyphAtlas) -> Result<ShaderId, RenderError>;

    fn begin_scene(&mut self, scene: &SceneContext) -> Result<(), RenderError>;

    fn end_scene(&mut self, scene: &SceneContext);

    fn write_geometry(&mut self, vertices: &[Vertex], indices: &[u32]);

    fn draw_indexed(&mut self, scene: &SceneContext, index_count: u32);

    fn draw_mesh(&mut self, scene: &SceneContext, mesh: &Mesh);

    /// Clears `target` (the main target when `None`) to `color`.
    fn clear(&mut self, target: Option<TargetId>, color: Color) -> Result<(), RenderError>;
}

/// Handle of the built-in flat-color batch shader. Every backend registers it
/// first.
pub const BATCH_SHADER: ShaderId = ShaderId(0);
