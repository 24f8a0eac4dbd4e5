//! Batched 2D rendering.
//!
//! `Renderer2D` turns quads, lines, strings and meshes into batched indexed
//! draws and hands them to a `RenderBackend`:
//! - `WgpuBackend` draws with wgpu into offscreen targets.
//! - `RecordingBackend` records calls, for tests and tooling.
//!
//! Convention:
//! - Positions are world units; the scene camera maps them to clip space.
//! - One vertex layout (`Vertex`) and one bind group layout serve every shader.

mod backend;
mod config;
mod error;
mod geometry;
pub mod gpu;
mod handle;
mod mesh;
mod recording;
mod renderer;
mod vertex;

pub use backend::{RenderBackend, BATCH_SHADER};
pub use config::{RendererConfig, DEFAULT_QUAD_CAPACITY, MAX_QUAD_CAPACITY};
pub use error::{RenderError, ShaderError, TargetError};
pub use geometry::{BufferFull, GeometryBuffer};
pub use gpu::{Framebuffer, ShaderSource, WgpuBackend};
pub use handle::{ShaderId, TargetId};
pub use mesh::{Mesh, MeshError};
pub use recording::{BackendCall, RecordingBackend};
pub use renderer::{Line, Quad, Renderer2D, TextStyle, DEFAULT_LINE_WIDTH};
pub use vertex::{Vertex, QUAD_INDICES, QUAD_VERTEX_COUNT};
