//! Lumen engine crate.
//!
//! A batched immediate-mode 2D renderer on wgpu: orthographic cameras, quads,
//! lines, distance-field text from pre-baked glyph files, and offscreen
//! targets. Windowing and presentation are left to the caller.

pub mod camera;
pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
