//! Paint types.
//!
//! Colors are straight-alpha RGBA in `[0, 1]`, written into every vertex as-is.
//! Blending is standard source-over alpha blending.

mod color;

pub use color::Color;
