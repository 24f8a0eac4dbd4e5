use std::path::Path;

use wgpu::util::DeviceExt;

use crate::device::{Gpu, GpuInit};
use crate::paint::Color;
use crate::render::{
    Mesh, RenderBackend, RenderError, ShaderError, ShaderId, TargetError, TargetId, Vertex,
    BATCH_SHADER,
};
use crate::scene::SceneContext;
use crate::text::GlyphAtlas;

use super::pipeline::{self, SceneUniform, TargetDesc};
use super::shader::{self, ShaderSource};
use super::Framebuffer;

/// [`RenderBackend`] on wgpu.
///
/// Every flush records one render pass that loads the target, draws the batch
/// with a single `draw_indexed` and is submitted immediately, so queued buffer
/// writes land between passes in call order.
///
/// All pipelines share one bind group: the scene uniform, the glyph texture
/// array and its sampler. All targets share the format and sample count given
/// in [`GpuInit`].
pub struct WgpuBackend {
    gpu: Gpu,
    target_desc: TargetDesc,

    // bindings
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    bind_group: wgpu::BindGroup,
    scene_ubo: wgpu::Buffer,
    sampler: wgpu::Sampler,
    atlas_view: wgpu::TextureView,

    // geometry
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,

    // registries
    pipelines: Vec<wgpu::RenderPipeline>,
    main_target: Framebuffer,
    targets: Vec<Framebuffer>,
}

impl WgpuBackend {
    /// Builds the shared bindings, the main target and the built-in batch
    /// shader (registered as [`BATCH_SHADER`]).
    pub fn new(gpu: Gpu, init: &GpuInit) -> Result<Self, RenderError> {
        let target_desc = TargetDesc {
            format: init.target_format,
            sample_count: init.sample_count,
        };
        let (width, height) = init.target_size;
        let main_target =
            Framebuffer::new(&gpu, target_desc.format, width, height, target_desc.sample_count)?;

        let device = gpu.device();
        let bind_group_layout = pipeline::scene_bind_group_layout(device);
        let pipeline_layout = pipeline::pipeline_layout(device, &bind_group_layout);

        let scene_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen scene ubo"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lumen atlas sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let atlas_view = upload_atlas(&gpu, &GlyphAtlas::default());
        let bind_group =
            create_bind_group(device, &bind_group_layout, &scene_ubo, &atlas_view, &sampler);

        let mut backend = Self {
            gpu,
            target_desc,
            bind_group_layout,
            pipeline_layout,
            bind_group,
            scene_ubo,
            sampler,
            atlas_view,
            vertex_buffer: None,
            index_buffer: None,
            pipelines: Vec::new(),
            main_target,
            targets: Vec::new(),
        };

        let batch = backend.create_shader(&ShaderSource::batch())?;
        debug_assert_eq!(batch, BATCH_SHADER);

        log::debug!(
            "WgpuBackend: {:?} {}x{} x{} samples",
            target_desc.format,
            width,
            height,
            target_desc.sample_count
        );
        Ok(backend)
    }

    // ── accessors ──────────────────────────────────────────────────────────

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    /// Handle of the built-in batch shader.
    pub fn batch_shader(&self) -> ShaderId {
        BATCH_SHADER
    }

    /// Target drawn to by scenes without an explicit one.
    pub fn main_target(&self) -> &Framebuffer {
        &self.main_target
    }

    pub fn target(&self, id: TargetId) -> Option<&Framebuffer> {
        self.targets.get(id.index())
    }

    // ── shaders ────────────────────────────────────────────────────────────

    /// Compiles `source` into a pipeline for the shared vertex layout and
    /// bindings. A module that compiles but does not fit that pipeline fails
    /// with `ShaderError::Link` and takes no handle.
    pub fn create_shader(&mut self, source: &ShaderSource) -> Result<ShaderId, ShaderError> {
        let module = shader::compile(self.gpu.device(), source)?;
        let pipeline = pipeline::create_pipeline(
            self.gpu.device(),
            &self.pipeline_layout,
            &module,
            source.label(),
            self.target_desc,
        )?;

        let id = ShaderId(self.pipelines.len() as u32);
        self.pipelines.push(pipeline);
        log::debug!("WgpuBackend: compiled '{}' as {id:?}", source.label());
        Ok(id)
    }

    /// Reads and compiles a `.wgsl` file.
    pub fn load_shader(&mut self, path: impl AsRef<Path>) -> Result<ShaderId, ShaderError> {
        let source = ShaderSource::load(path)?;
        self.create_shader(&source)
    }

    // ── targets ────────────────────────────────────────────────────────────

    /// Allocates an offscreen target with the shared format and sample count.
    pub fn create_target(&mut self, width: u32, height: u32) -> Result<TargetId, TargetError> {
        let target = Framebuffer::new(
            &self.gpu,
            self.target_desc.format,
            width,
            height,
            self.target_desc.sample_count,
        )?;
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(target);
        Ok(id)
    }

    pub fn resize_target(&mut self, id: TargetId, width: u32, height: u32) -> Result<(), TargetError> {
        let target = self.targets.get_mut(id.index()).ok_or(TargetError::Unknown(id))?;
        target.resize(&self.gpu, width, height)
    }

    pub fn resize_main_target(&mut self, width: u32, height: u32) -> Result<(), TargetError> {
        self.main_target.resize(&self.gpu, width, height)
    }

    // ── passes ─────────────────────────────────────────────────────────────

    fn resolve_target(&self, id: Option<TargetId>) -> Result<&Framebuffer, TargetError> {
        match id {
            None => Ok(&self.main_target),
            Some(id) => self.targets.get(id.index()).ok_or(TargetError::Unknown(id)),
        }
    }

    /// Records one loading pass with the scene's pipeline and submits it.
    fn scene_pass(&self, scene: &SceneContext, label: &str, draw: impl FnOnce(&mut wgpu::RenderPass<'_>)) {
        // begin_scene already rejected unknown handles.
        let Some(pipeline) = self.pipelines.get(scene.shader.index()) else {
            log::warn!("WgpuBackend: unknown {:?}, skipping {label}", scene.shader);
            return;
        };
        let Ok(target) = self.resolve_target(scene.target) else {
            log::warn!("WgpuBackend: unknown {:?}, skipping {label}", scene.target);
            return;
        };

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });

        {
            let (view, resolve_target) = target.attachment();
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            draw(&mut rpass);
        }

        self.gpu.submit(encoder);
    }
}

impl RenderBackend for WgpuBackend {
    fn reserve_geometry(&mut self, max_vertices: usize, max_indices: usize) {
        let device = self.gpu.device();
        self.vertex_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen batch vbo"),
            size: (max_vertices * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.index_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen batch ibo"),
            size: (max_indices * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
    }

    fn create_font_shader(&mut self, atlas: &GlyphAtlas) -> Result<ShaderId, RenderError> {
        let max_layers = self.gpu.device().limits().max_texture_array_layers;
        if atlas.layer_count() > max_layers {
            return Err(RenderError::Config(format!(
                "glyph atlas has {} layers, device allows {max_layers}",
                atlas.layer_count()
            )));
        }

        self.atlas_view = upload_atlas(&self.gpu, atlas);
        self.bind_group = create_bind_group(
            self.gpu.device(),
            &self.bind_group_layout,
            &self.scene_ubo,
            &self.atlas_view,
            &self.sampler,
        );

        Ok(self.create_shader(&ShaderSource::font())?)
    }

    fn begin_scene(&mut self, scene: &SceneContext) -> Result<(), RenderError> {
        if self.pipelines.get(scene.shader.index()).is_none() {
            return Err(ShaderError::Unknown(scene.shader).into());
        }
        self.resolve_target(scene.target)?;

        self.gpu
            .queue()
            .write_buffer(&self.scene_ubo, 0, bytemuck::bytes_of(&SceneUniform::new(scene)));
        Ok(())
    }

    fn end_scene(&mut self, scene: &SceneContext) {
        log::trace!("WgpuBackend: end scene {:?}", scene.shader);
    }

    fn write_geometry(&mut self, vertices: &[Vertex], indices: &[u32]) {
        let (Some(vbo), Some(ibo)) = (self.vertex_buffer.as_ref(), self.index_buffer.as_ref()) else {
            log::warn!("WgpuBackend: geometry written before reserve_geometry");
            return;
        };
        let queue = self.gpu.queue();
        queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
        queue.write_buffer(ibo, 0, bytemuck::cast_slice(indices));
    }

    fn draw_indexed(&mut self, scene: &SceneContext, index_count: u32) {
        let (Some(vbo), Some(ibo)) = (self.vertex_buffer.as_ref(), self.index_buffer.as_ref()) else {
            return;
        };
        self.scene_pass(scene, "lumen batch pass", |rpass| {
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        });
    }

    fn draw_mesh(&mut self, scene: &SceneContext, mesh: &Mesh) {
        if mesh.is_empty() {
            return;
        }
        let device = self.gpu.device();
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen mesh vbo"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen mesh ibo"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.scene_pass(scene, "lumen mesh pass", |rpass| {
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
        });
    }

    fn clear(&mut self, target: Option<TargetId>, color: Color) -> Result<(), RenderError> {
        let framebuffer = self.resolve_target(target)?;
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lumen clear encoder"),
            });

        {
            let (view, resolve_target) = framebuffer.attachment();
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.submit(encoder);
        Ok(())
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

const MIN_ATLAS_LAYERS: u32 = 2;

/// Uploads `atlas` as a `64×64×N` texture array and returns its array view.
///
/// The texture always has at least two layers. The GL backend infers a view's
/// dimension from the layer count and would treat a single layer as `D2`,
/// breaking the `D2Array` binding. Unused layers stay blank.
fn upload_atlas(gpu: &Gpu, atlas: &GlyphAtlas) -> wgpu::TextureView {
    let side = GlyphAtlas::LAYER_SIZE;
    let size = wgpu::Extent3d {
        width: side,
        height: side,
        depth_or_array_layers: atlas.layer_count().max(MIN_ATLAS_LAYERS),
    };

    let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("lumen glyph atlas"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        // Distance fields are linear data.
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    if !atlas.is_empty() {
        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            atlas.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(side * 4),
                rows_per_image: Some(side),
            },
            wgpu::Extent3d {
                depth_or_array_layers: atlas.layer_count(),
                ..size
            },
        );
    }

    texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("lumen glyph atlas view"),
        dimension: Some(wgpu::TextureViewDimension::D2Array),
        ..Default::default()
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    scene_ubo: &wgpu::Buffer,
    atlas_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lumen scene bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(atlas_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::camera::Camera;
    use crate::coords::Viewport;
    use crate::render::{Line, Quad, Renderer2D, RendererConfig, TextStyle};
    use crate::text::{GlyphRecord, LoadedFont, GLYPH_CELL_SIZE, GLYPH_PIXEL_BYTES};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    /// Headless device, or `None` on machines without an adapter.
    fn backend(sample_count: u32) -> Option<WgpuBackend> {
        let init = GpuInit {
            target_size: (64, 64),
            sample_count,
            ..GpuInit::default()
        };
        let gpu = match pollster::block_on(Gpu::headless(&init)) {
            Ok(gpu) => gpu,
            Err(err) => {
                eprintln!("skipping GPU test: {err:#}");
                return None;
            }
        };
        Some(WgpuBackend::new(gpu, &init).unwrap())
    }

    /// Copies the main target back to the CPU, one RGBA8 texel per pixel in
    /// row-major order from the top-left.
    fn read_main_target(backend: &WgpuBackend) -> Vec<[u8; 4]> {
        let target = backend.main_target();
        let (width, height) = target.size();
        let row_bytes = width * 4;
        let padded_row = row_bytes.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let device = backend.gpu().device();
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen readback"),
            size: (padded_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("lumen readback"),
        });
        encoder.copy_texture_to_buffer(
            target.resolve_texture().as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
        backend.gpu().submit(encoder);

        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |result| result.unwrap());
        device.poll(wgpu::PollType::wait_indefinitely()).unwrap();

        let data = slice.get_mapped_range();
        data.chunks(padded_row as usize)
            .flat_map(|row| row[..row_bytes as usize].chunks_exact(4))
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect()
    }

    fn pixel(pixels: &[[u8; 4]], x: u32, y: u32) -> [u8; 4] {
        pixels[(y * 64 + x) as usize]
    }

    /// One glyph ('A') whose layer is `texel` on the left half and transparent
    /// black on the right half.
    fn half_filled_font(texel: [u8; 4]) -> LoadedFont {
        let mut pixels = vec![0u8; GLYPH_PIXEL_BYTES];
        for (i, p) in pixels.chunks_exact_mut(4).enumerate() {
            if (i as u32 % GLYPH_CELL_SIZE) < GLYPH_CELL_SIZE / 2 {
                p.copy_from_slice(&texel);
            }
        }
        LoadedFont::from_records([GlyphRecord {
            code: 'A' as u16,
            advance: 40.0,
            bearing: Vec2::new(0.0, 40.0),
            size: Vec2::new(40.0, 40.0),
            pixels,
        }])
        .unwrap()
    }

    // ── smoke ────────────────────────────────────────────────────────────

    #[test]
    fn renders_a_scene_headless() {
        let Some(backend) = backend(4) else { return };
        let mut r = Renderer2D::new(backend, &RendererConfig::default().with_quad_capacity(8)).unwrap();
        r.set_viewport(Viewport::new(64.0, 64.0));

        let target = r.backend_mut().create_target(32, 32).unwrap();
        let camera = Camera::new(64.0, 64.0);

        r.clear(None, Color::BLACK).unwrap();
        r.begin_scene(&camera, BATCH_SHADER, None).unwrap();
        for i in 0..20 {
            r.draw_quad(Quad::new(Vec2::splat(i as f32), Vec2::splat(4.0))).unwrap();
        }
        r.draw_line(Line::new(Vec2::ZERO, Vec2::new(20.0, 10.0))).unwrap();
        r.draw_string(" ", 0.0, 0.0, TextStyle::default()).unwrap();
        r.draw_mesh(&Mesh::fullscreen_quad()).unwrap();
        r.end_scene().unwrap();

        r.begin_scene(&camera, BATCH_SHADER, Some(target)).unwrap();
        r.draw_quad(Quad::new(Vec2::ZERO, Vec2::ONE)).unwrap();
        r.end_scene().unwrap();
    }

    // ── pixels ───────────────────────────────────────────────────────────

    #[test]
    fn later_quads_paint_over_earlier_batches() {
        let Some(backend) = backend(1) else { return };
        let mut r = Renderer2D::new(backend, &RendererConfig::default().with_quad_capacity(1)).unwrap();
        // 64×64 world units on a 64×64 target: one unit per pixel, origin at the center.
        let camera = Camera::new(64.0, 64.0);

        r.clear(None, Color::BLACK).unwrap();
        r.begin_scene(&camera, BATCH_SHADER, None).unwrap();
        r.draw_quad(Quad::new(Vec2::ZERO, Vec2::splat(40.0)).color(Color::rgb(1.0, 0.0, 0.0))).unwrap();
        r.draw_quad(Quad::new(Vec2::ZERO, Vec2::splat(20.0)).color(Color::rgb(0.0, 0.0, 1.0))).unwrap();
        r.end_scene().unwrap();

        let pixels = read_main_target(r.backend());
        assert_eq!(pixel(&pixels, 32, 32), BLUE);
        assert_eq!(pixel(&pixels, 15, 32), RED);
        assert_eq!(pixel(&pixels, 32, 48), RED);
        assert_eq!(pixel(&pixels, 2, 2), BLACK);
    }

    #[test]
    fn batch_slot_n_samples_atlas_layer_n_minus_one() {
        let Some(backend) = backend(1) else { return };
        let font = half_filled_font(GREEN);
        let slot = font.table.get('A').unwrap().slot;
        let mut r = Renderer2D::with_font(backend, &RendererConfig::default(), font).unwrap();
        let camera = Camera::new(64.0, 64.0);

        r.clear(None, Color::BLACK).unwrap();
        r.begin_scene(&camera, BATCH_SHADER, None).unwrap();
        // Untextured white quad in the top half, textured quad in the bottom half.
        r.draw_quad_tl(Quad::new(Vec2::new(-32.0, 0.0), Vec2::new(64.0, 32.0))).unwrap();
        r.draw_quad_tl(
            Quad::new(Vec2::new(-32.0, -32.0), Vec2::new(64.0, 32.0)).texture(slot as f32 + 1.0),
        )
        .unwrap();
        r.end_scene().unwrap();

        let pixels = read_main_target(r.backend());
        assert_eq!(pixel(&pixels, 8, 16), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixels, 56, 16), [255, 255, 255, 255]);
        // Left half of the layer is green, right half transparent.
        assert_eq!(pixel(&pixels, 8, 48), GREEN);
        assert_eq!(pixel(&pixels, 56, 48), BLACK);
    }

    #[test]
    fn glyph_coverage_comes_from_the_distance_field() {
        let Some(backend) = backend(1) else { return };
        let font = half_filled_font([255, 255, 255, 255]);
        let mut r = Renderer2D::with_font(backend, &RendererConfig::default(), font).unwrap();
        let camera = Camera::new(64.0, 64.0);

        r.clear(None, Color::BLACK).unwrap();
        r.begin_scene(&camera, BATCH_SHADER, None).unwrap();
        // At scale 0.5 the cell is 32 units wide and starts 5 units before the
        // pen, so it covers -16..16 on both axes.
        let style = TextStyle::default().color(Color::rgb(1.0, 0.0, 0.0)).scale(0.5);
        r.draw_string("A", -11.0, -11.0, style).unwrap();
        r.end_scene().unwrap();

        let pixels = read_main_target(r.backend());
        assert_eq!(pixel(&pixels, 20, 32), RED);
        assert_eq!(pixel(&pixels, 44, 32), BLACK);
        assert_eq!(pixel(&pixels, 4, 32), BLACK);
    }

    #[test]
    fn single_sample_targets_have_no_resolve() {
        let Some(backend) = backend(1) else { return };
        let (_, resolve) = backend.main_target().attachment();
        assert!(resolve.is_none());
    }

    // ── shaders ──────────────────────────────────────────────────────────

    #[test]
    fn built_in_batch_shader_is_first() {
        let Some(backend) = backend(1) else { return };
        assert_eq!(backend.batch_shader(), ShaderId(0));
    }

    #[test]
    fn bad_wgsl_reports_compile_log() {
        let Some(mut backend) = backend(1) else { return };
        let err = backend
            .create_shader(&ShaderSource::wgsl("broken.wgsl", "fn vs_main( {"))
            .unwrap_err();
        match err {
            ShaderError::Compile { path, log } => {
                assert_eq!(path, "broken.wgsl");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pipeline_mismatch_is_a_link_error() {
        let Some(mut backend) = backend(1) else { return };
        // Compiles, but has no fs_main and its vertex input does not match the
        // vertex layout.
        let source = ShaderSource::wgsl(
            "link.wgsl",
            "@vertex fn vs_main(@location(0) p: vec4<u32>) -> @builtin(position) vec4<f32> {\n\
             return vec4<f32>(p);\n\
             }",
        );

        match backend.create_shader(&source).unwrap_err() {
            ShaderError::Link { path, log } => {
                assert_eq!(path, "link.wgsl");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The failed shader did not take a handle.
        assert_eq!(backend.create_shader(&ShaderSource::batch()).unwrap(), ShaderId(1));
    }

    #[test]
    fn atlas_array_has_at_least_two_layers() {
        let Some(mut backend) = backend(1) else { return };
        assert_eq!(backend.atlas_view.texture().depth_or_array_layers(), 2);

        let font = half_filled_font(GREEN);
        backend.create_font_shader(&font.atlas).unwrap();
        assert_eq!(font.atlas.layer_count(), 1);
        assert_eq!(backend.atlas_view.texture().depth_or_array_layers(), 2);
    }

    // ── targets ──────────────────────────────────────────────────────────

    #[test]
    fn oversized_target_is_incomplete() {
        let Some(mut backend) = backend(1) else { return };
        let max = backend.gpu().device().limits().max_texture_dimension_2d;
        assert!(matches!(
            backend.create_target(max + 1, 1),
            Err(TargetError::Incomplete(_))
        ));
    }

    #[test]
    fn resize_keeps_handle() {
        let Some(mut backend) = backend(1) else { return };
        let id = backend.create_target(16, 16).unwrap();
        backend.resize_target(id, 48, 24).unwrap();
        assert_eq!(backend.target(id).map(Framebuffer::size), Some((48, 24)));
        assert!(matches!(
            backend.resize_target(TargetId(7), 1, 1),
            Err(TargetError::Unknown(TargetId(7)))
        ));
    }
}
