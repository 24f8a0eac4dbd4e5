use std::borrow::Cow;
use std::path::Path;

use crate::render::ShaderError;

/// WGSL source plus the label diagnostics refer to it by.
///
/// Shaders consume [`Vertex`](crate::render::Vertex) and the scene bind group
/// (`@group(0)`: scene uniform, texture array, sampler) and must define
/// `vs_main` and `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    label: String,
    wgsl: Cow<'static, str>,
}

impl ShaderSource {
    pub fn wgsl(label: impl Into<String>, wgsl: impl Into<Cow<'static, str>>) -> Self {
        Self { label: label.into(), wgsl: wgsl.into() }
    }

    /// Reads a `.wgsl` file; the path becomes the label.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let wgsl = std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::wgsl(path.display().to_string(), wgsl))
    }

    pub(super) fn batch() -> Self {
        Self::wgsl("batch.wgsl", include_str!("shaders/batch.wgsl"))
    }

    pub(super) fn font() -> Self {
        Self::wgsl("font.wgsl", include_str!("shaders/font.wgsl"))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.wgsl
    }
}

/// Compiles `source`, turning compiler errors into `ShaderError::Compile`.
pub(super) fn compile(
    device: &wgpu::Device,
    source: &ShaderSource,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&source.label),
        source: wgpu::ShaderSource::Wgsl(source.wgsl.clone()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(at) => format!("{}:{}: {}", at.line_number, at.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();

    for warning in info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Warning))
    {
        log::warn!("{}: {}", source.label, warning.message);
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        Err(ShaderError::Compile {
            path: source.label.clone(),
            log: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_shaders_share_the_entry_points() {
        for s in [ShaderSource::batch(), ShaderSource::font()] {
            assert!(s.source().contains("fn vs_main"), "{}", s.label());
            assert!(s.source().contains("fn fs_main"), "{}", s.label());
            assert!(s.source().contains("@group(0) @binding(0) var<uniform> scene"));
        }
    }

    #[test]
    fn load_uses_path_as_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tint.wgsl");
        std::fs::write(&path, "// empty").unwrap();

        let s = ShaderSource::load(&path).unwrap();
        assert_eq!(s.label(), path.display().to_string());
        assert_eq!(s.source(), "// empty");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShaderSource::load(dir.path().join("missing.wgsl")).unwrap_err();
        assert!(matches!(err, ShaderError::Read { .. }));
    }
}
