//! Coordinate and geometry types shared by the renderer, camera and text layout.
//!
//! Vector, matrix and quaternion types are `glam`'s. World space is whatever the
//! active camera maps to clip space; the renderer never assumes a Y direction
//! except in the string-drawing variants that say so.

mod viewport;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use viewport::Viewport;
