use glam::{Mat4, Quat, Vec2, Vec3};

use crate::camera::Camera;
use crate::coords::Viewport;
use crate::paint::Color;
use crate::scene::{SceneContext, SceneError, SceneState};
use crate::text::{layout_text, load_glyph_dir, GlyphCell, GlyphError, GlyphTable, LoadedFont, YAxis};

use super::{GeometryBuffer, Mesh, RenderBackend, RenderError, RendererConfig, ShaderId, TargetId, Vertex};

/// Default stroke width of [`Line`].
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

// ── draw parameters ───────────────────────────────────────────────────────

/// A quad to batch. Built with [`Quad::new`] and the chained setters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub rotation: Quat,
    /// Passed to the shader in `uv.z`. `0` means untextured for the batch shader.
    pub texture: f32,
}

impl Quad {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            color: Color::WHITE,
            rotation: Quat::IDENTITY,
            texture: 0.0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation about the view axis, in degrees.
    pub fn rotation_deg(self, degrees: f32) -> Self {
        self.rotation(Quat::from_rotation_z(degrees.to_radians()))
    }

    pub fn texture(mut self, slot: f32) -> Self {
        self.texture = slot;
        self
    }

    fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.size.extend(1.0),
            self.rotation,
            self.position.extend(0.0),
        )
    }
}

/// A thick line segment drawn as one quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
    pub width: f32,
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            color: Color::WHITE,
            width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Color and scale of a drawn string.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub scale: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { color: Color::WHITE, scale: 1.0 }
    }
}

impl TextStyle {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

// ── corner tables ─────────────────────────────────────────────────────────

const CENTERED_CORNERS: [Vec2; 4] = [
    Vec2::new(-0.5, 0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(-0.5, -0.5),
];

const CORNER_ANCHORED: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

// V is 0 on the +Y edge, which is the top of a y-up camera.
const CENTERED_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

const CORNER_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
];

// For y-down cameras the +Y edge is the bottom.
const CORNER_UVS_FLIPPED: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

// ── renderer ──────────────────────────────────────────────────────────────

/// Immediate-mode batched 2D renderer.
///
/// Draws are only accepted between [`begin_scene`](Self::begin_scene) and
/// [`end_scene`](Self::end_scene). Quads accumulate in a fixed-capacity buffer
/// and are submitted as one indexed draw per flush, in submission order. A
/// flush happens when the buffer fills, before a mesh draw, and when the scene
/// ends.
///
/// Strings are drawn with the font shader: the open scene is closed, a font
/// scene with the same camera and target is drawn, and the caller's scene is
/// reopened unchanged.
pub struct Renderer2D<B: RenderBackend> {
    backend: B,
    geometry: GeometryBuffer,
    glyphs: GlyphTable,
    font_shader: ShaderId,
    scene: SceneState,
    viewport: Viewport,
}

impl<B: RenderBackend> Renderer2D<B> {
    /// Creates a renderer, loading the font from `config.glyph_dir` if set.
    pub fn new(backend: B, config: &RendererConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let font = match &config.glyph_dir {
            Some(dir) => load_glyph_dir(dir)?,
            None => LoadedFont::empty(),
        };
        Self::with_font(backend, config, font)
    }

    /// Creates a renderer around an already loaded font.
    pub fn with_font(
        mut backend: B,
        config: &RendererConfig,
        font: LoadedFont,
    ) -> Result<Self, RenderError> {
        config.validate()?;

        let geometry = GeometryBuffer::new(config.quad_capacity);
        backend.reserve_geometry(geometry.max_vertices(), geometry.max_indices());
        let font_shader = backend.create_font_shader(&font.atlas)?;

        log::debug!(
            "Renderer2D: {} quads per batch, {} glyphs",
            geometry.quad_capacity(),
            font.table.len()
        );

        Ok(Self {
            backend,
            geometry,
            glyphs: font.table,
            font_shader,
            scene: SceneState::Closed,
            viewport: Viewport::default(),
        })
    }

    // ── accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access, for registering shaders and targets.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    #[inline]
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    #[inline]
    pub fn font_shader(&self) -> ShaderId {
        self.font_shader
    }

    /// The open scene, if any.
    #[inline]
    pub fn scene(&self) -> Option<&SceneContext> {
        self.scene.current()
    }

    /// Quads waiting for the next flush.
    #[inline]
    pub fn pending_quads(&self) -> usize {
        self.geometry.quad_count()
    }

    #[inline]
    pub fn quad_capacity(&self) -> usize {
        self.geometry.quad_capacity()
    }

    /// Target size in pixels, handed to shaders with every scene.
    ///
    /// Takes effect at the next `begin_scene`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ── scene bracket ──────────────────────────────────────────────────────

    /// Opens a scene drawing with `shader` through `camera` into `target`
    /// (the main target when `None`).
    pub fn begin_scene(
        &mut self,
        camera: &Camera,
        shader: ShaderId,
        target: Option<TargetId>,
    ) -> Result<(), RenderError> {
        let ctx = SceneContext::new(shader, camera.view_projection(), target, self.viewport);
        self.open_scene(ctx)
    }

    /// Flushes pending quads and closes the scene.
    pub fn end_scene(&mut self) -> Result<(), RenderError> {
        let ctx = *self.scene.require()?;
        self.flush()?;
        self.backend.end_scene(&ctx);
        self.scene.close()?;
        log::debug!("Renderer2D: end scene {:?}", ctx.shader);
        Ok(())
    }

    fn open_scene(&mut self, ctx: SceneContext) -> Result<(), RenderError> {
        if self.scene.is_open() {
            return Err(SceneError::AlreadyOpen.into());
        }
        // The backend validates handles before the state flips, so a rejected
        // scene leaves the renderer closed.
        self.backend.begin_scene(&ctx)?;
        self.scene.open(ctx)?;
        log::debug!("Renderer2D: begin scene {:?} -> {:?}", ctx.shader, ctx.target);
        Ok(())
    }

    // ── batching ───────────────────────────────────────────────────────────

    /// Center-anchored quad.
    pub fn draw_quad(&mut self, quad: Quad) -> Result<(), RenderError> {
        let corners = Self::transform(&quad, &CENTERED_CORNERS, &CENTERED_UVS);
        self.push_quad(corners)
    }

    /// Quad anchored at its corner: `position` is the corner the quad grows
    /// from towards +X and +Y.
    pub fn draw_quad_tl(&mut self, quad: Quad) -> Result<(), RenderError> {
        let corners = Self::transform(&quad, &CORNER_ANCHORED, &CORNER_UVS);
        self.push_quad(corners)
    }

    /// Thick segment with `width / 2` on each side of the line.
    ///
    /// A zero-length line has no direction and produces a degenerate quad.
    pub fn draw_line(&mut self, line: Line) -> Result<(), RenderError> {
        let dir = (line.end - line.start).normalize_or_zero();
        let offset = Vec2::new(dir.y, -dir.x) * (line.width * 0.5);
        let color = line.color.to_array();

        let corner = |p: Vec2, u: f32, v: f32| Vertex::new([p.x, p.y, 0.0], [u, v, 0.0], color);
        self.push_quad([
            corner(line.start + offset, 0.0, 1.0),
            corner(line.end + offset, 1.0, 1.0),
            corner(line.end - offset, 1.0, 0.0),
            corner(line.start - offset, 0.0, 0.0),
        ])
    }

    /// Draws `text` with its first baseline at `(x, y)` for a y-up camera.
    ///
    /// Returns the measured `(width, height)` of the block. A character
    /// missing from the font fails the call before anything is drawn.
    pub fn draw_string(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
    ) -> Result<Vec2, RenderError> {
        self.draw_text(text, Vec2::new(x, y), style, YAxis::Up)
    }

    /// [`draw_string`](Self::draw_string) for y-down cameras: the text block
    /// hangs below `(x, y)`, lines advance towards +Y and glyph V coordinates
    /// are flipped.
    pub fn draw_string_flipped(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
    ) -> Result<Vec2, RenderError> {
        self.draw_text(text, Vec2::new(x, y), style, YAxis::Down)
    }

    /// Size `draw_string` would report, without drawing.
    pub fn measure_string(&self, text: &str, scale: f32) -> Result<Vec2, GlyphError> {
        layout_text(&self.glyphs, text, Vec2::ZERO, scale, YAxis::Up).map(|l| l.size)
    }

    /// Draws `mesh` with the open scene's shader, camera and target.
    pub fn draw_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        let ctx = *self.scene.require()?;
        self.flush()?;
        self.backend.draw_mesh(&ctx, mesh);
        Ok(())
    }

    /// Submits pending quads as one indexed draw. Does nothing when empty.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        if self.geometry.is_empty() {
            return Ok(());
        }
        let ctx = *self.scene.require()?;

        self.backend
            .write_geometry(self.geometry.vertices(), self.geometry.indices());
        self.backend.draw_indexed(&ctx, self.geometry.index_count());
        log::trace!(
            "Renderer2D: flushed {} quads with {:?}",
            self.geometry.quad_count(),
            ctx.shader
        );

        self.geometry.clear();
        Ok(())
    }

    /// Clears `target` (the main target when `None`).
    ///
    /// Pending quads are flushed first so they are not drawn over the cleared
    /// target later.
    pub fn clear(&mut self, target: Option<TargetId>, color: Color) -> Result<(), RenderError> {
        if self.scene.is_open() {
            self.flush()?;
        }
        self.backend.clear(target, color)
    }

    // ── internals ──────────────────────────────────────────────────────────

    fn transform(quad: &Quad, corners: &[Vec2; 4], uvs: &[Vec2; 4]) -> [Vertex; 4] {
        let model = quad.model();
        let color = quad.color.to_array();
        std::array::from_fn(|i| {
            let p = model.transform_point3(Vec3::new(corners[i].x, corners[i].y, 0.0));
            Vertex::new(p.to_array(), [uvs[i].x, uvs[i].y, quad.texture], color)
        })
    }

    fn push_quad(&mut self, corners: [Vertex; 4]) -> Result<(), RenderError> {
        self.scene.require()?;
        if self.geometry.is_full() {
            self.flush()?;
        }
        self.geometry.push_quad(corners)?;
        Ok(())
    }

    fn push_glyph(&mut self, cell: &GlyphCell, color: Color, y_axis: YAxis) -> Result<(), RenderError> {
        let uvs = match y_axis {
            YAxis::Up => &CORNER_UVS,
            YAxis::Down => &CORNER_UVS_FLIPPED,
        };
        let quad = Quad::new(cell.origin, Vec2::splat(cell.side))
            .color(color)
            .texture(cell.slot as f32);
        self.push_quad(Self::transform(&quad, &CORNER_ANCHORED, uvs))
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Vec2,
        style: TextStyle,
        y_axis: YAxis,
    ) -> Result<Vec2, RenderError> {
        let saved = *self.scene.require()?;

        let layout = match layout_text(&self.glyphs, text, origin, style.scale, y_axis) {
            Ok(layout) => layout,
            Err(err) => {
                log::warn!("Renderer2D: cannot draw {text:?}: {err}");
                return Err(err.into());
            }
        };

        self.end_scene()?;

        let drawn = self.draw_glyph_scene(saved, &layout.cells, style.color, y_axis);
        if drawn.is_err() && self.scene.is_open() {
            if let Err(err) = self.end_scene() {
                log::debug!("Renderer2D: closing font scene after failure: {err}");
            }
        }

        self.open_scene(saved)?;
        drawn?;
        Ok(layout.size)
    }

    fn draw_glyph_scene(
        &mut self,
        saved: SceneContext,
        cells: &[GlyphCell],
        color: Color,
        y_axis: YAxis,
    ) -> Result<(), RenderError> {
        self.open_scene(saved.with_shader(self.font_shader))?;
        for cell in cells {
            self.push_glyph(cell, color, y_axis)?;
        }
        self.end_scene()
    }
}
