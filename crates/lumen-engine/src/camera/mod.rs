//! Orthographic cameras for 2D scenes.
//!
//! A camera only produces matrices; `Renderer2D::begin_scene` copies the
//! view-projection out of it, so the camera may be mutated freely between scenes.

mod orthographic;

pub use orthographic::Camera;
