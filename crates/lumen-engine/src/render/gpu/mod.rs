//! wgpu implementation of the render backend.

mod backend;
mod pipeline;
mod shader;
mod target;

pub use backend::WgpuBackend;
pub use shader::ShaderSource;
pub use target::Framebuffer;
