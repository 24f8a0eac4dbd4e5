use std::path::PathBuf;

use crate::scene::SceneError;
use crate::text::{GlyphError, GlyphLoadError};

use super::geometry::BufferFull;
use super::mesh::MeshError;
use super::{ShaderId, TargetId};

/// Shader loading or compilation failure.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiler diagnostics, one per line.
    #[error("failed to compile '{path}'\n{log}")]
    Compile { path: String, log: String },

    /// The module compiled but does not fit the renderer's pipeline: missing
    /// `vs_main`/`fs_main`, vertex inputs that differ from the vertex layout,
    /// or bindings outside the scene bind group.
    #[error("failed to link '{path}'\n{log}")]
    Link { path: String, log: String },

    #[error("unknown shader {0:?}")]
    Unknown(ShaderId),
}

/// Offscreen target creation or lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The requested size or sample count cannot be backed by the device.
    #[error("framebuffer is not complete: {0}")]
    Incomplete(String),

    #[error("unknown render target {0:?}")]
    Unknown(TargetId),
}

/// Any failure surfaced by the renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    GlyphLoad(#[from] GlyphLoadError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Geometry(#[from] BufferFull),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("invalid renderer config: {0}")]
    Config(String),
}
