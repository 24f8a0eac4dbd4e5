use std::path::PathBuf;

use super::RenderError;

/// Quads per batch unless configured otherwise.
pub const DEFAULT_QUAD_CAPACITY: usize = 10_000;

/// Largest batch whose vertex indices still fit in `u32`.
pub const MAX_QUAD_CAPACITY: usize = (u32::MAX / 4) as usize;

/// Construction parameters for [`Renderer2D`](super::Renderer2D).
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Quads buffered before a forced flush.
    pub quad_capacity: usize,

    /// Directory of pre-baked glyph files.
    ///
    /// `None` starts with an empty font: only spaces and newlines can be drawn.
    pub glyph_dir: Option<PathBuf>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            quad_capacity: DEFAULT_QUAD_CAPACITY,
            glyph_dir: None,
        }
    }
}

impl RendererConfig {
    pub fn with_glyph_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.glyph_dir = Some(dir.into());
        self
    }

    pub fn with_quad_capacity(mut self, quads: usize) -> Self {
        self.quad_capacity = quads;
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.quad_capacity == 0 {
            return Err(RenderError::Config("quad_capacity must be at least 1".into()));
        }
        if self.quad_capacity > MAX_QUAD_CAPACITY {
            return Err(RenderError::Config(format!(
                "quad_capacity {} exceeds {MAX_QUAD_CAPACITY}",
                self.quad_capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RendererConfig::default();
        assert_eq!(config.quad_capacity, 10_000);
        assert!(config.glyph_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = RendererConfig::default().with_quad_capacity(0);
        assert!(matches!(config.validate(), Err(RenderError::Config(_))));
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let config = RendererConfig::default().with_quad_capacity(MAX_QUAD_CAPACITY + 1);
        assert!(config.validate().is_err());
    }
}
