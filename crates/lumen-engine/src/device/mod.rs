//! GPU device management.
//!
//! This module is responsible for creating the wgpu Instance/Adapter/Device/Queue.
//! There is no surface: targets are offscreen textures owned by the render
//! backend.

mod gpu;

pub use gpu::{Gpu, GpuInit};
