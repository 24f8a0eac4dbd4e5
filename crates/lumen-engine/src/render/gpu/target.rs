use crate::device::Gpu;
use crate::render::TargetError;

/// Offscreen color target.
///
/// With `sample_count > 1` draws go to a multisampled texture and are resolved
/// into a single-sample texture at the end of every pass; otherwise they go
/// straight to the resolve texture. Either way the resolve texture holds the
/// finished image and can be sampled by later passes.
pub struct Framebuffer {
    format: wgpu::TextureFormat,
    sample_count: u32,
    width: u32,
    height: u32,
    msaa_view: Option<wgpu::TextureView>,
    resolve: wgpu::Texture,
    resolve_view: wgpu::TextureView,
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("format", &self.format)
            .field("size", &(self.width, self.height))
            .field("sample_count", &self.sample_count)
            .finish()
    }
}

impl Framebuffer {
    /// Allocates a target, rejecting sizes and sample counts the device cannot
    /// back with `TargetError::Incomplete`.
    pub fn new(
        gpu: &Gpu,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Result<Self, TargetError> {
        validate(gpu, format, width, height, sample_count)?;
        Ok(Self::allocate(gpu.device(), format, width, height, sample_count))
    }

    /// Reallocates at a new size. Contents are discarded.
    pub fn resize(&mut self, gpu: &Gpu, width: u32, height: u32) -> Result<(), TargetError> {
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        validate(gpu, self.format, width, height, self.sample_count)?;
        *self = Self::allocate(gpu.device(), self.format, width, height, self.sample_count);
        Ok(())
    }

    fn allocate(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

        let resolve = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen framebuffer resolve"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let resolve_view = resolve.create_view(&wgpu::TextureViewDescriptor::default());

        let msaa_view = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("lumen framebuffer msaa"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        Self {
            format,
            sample_count,
            width,
            height,
            msaa_view,
            resolve,
            resolve_view,
        }
    }

    /// `(view, resolve_target)` for a color attachment.
    pub(crate) fn attachment(&self) -> (&wgpu::TextureView, Option<&wgpu::TextureView>) {
        match &self.msaa_view {
            Some(msaa) => (msaa, Some(&self.resolve_view)),
            None => (&self.resolve_view, None),
        }
    }

    /// Single-sample view of the finished image.
    pub fn resolve_view(&self) -> &wgpu::TextureView {
        &self.resolve_view
    }

    pub fn resolve_texture(&self) -> &wgpu::Texture {
        &self.resolve
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn validate(
    gpu: &Gpu,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    sample_count: u32,
) -> Result<(), TargetError> {
    check_size(width, height, gpu.device().limits().max_texture_dimension_2d)?;

    let features = gpu.adapter().get_texture_format_features(format);
    if !features.allowed_usages.contains(wgpu::TextureUsages::RENDER_ATTACHMENT) {
        return Err(TargetError::Incomplete(format!("{format:?} is not renderable")));
    }

    let adapter_specific = gpu
        .device()
        .features()
        .contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES);
    check_sample_count(features.flags, sample_count, adapter_specific)
}

fn check_size(width: u32, height: u32, max: u32) -> Result<(), TargetError> {
    if width == 0 || height == 0 {
        return Err(TargetError::Incomplete(format!("zero-sized {width}x{height}")));
    }
    if width > max || height > max {
        return Err(TargetError::Incomplete(format!(
            "{width}x{height} exceeds the {max} texel limit"
        )));
    }
    Ok(())
}

/// Counts every device accepts without adapter-specific format features.
const PORTABLE_SAMPLE_COUNTS: [u32; 2] = [1, 4];

fn check_sample_count(
    flags: wgpu::TextureFormatFeatureFlags,
    sample_count: u32,
    adapter_specific: bool,
) -> Result<(), TargetError> {
    if sample_count == 1 {
        return Ok(());
    }
    if !adapter_specific && !PORTABLE_SAMPLE_COUNTS.contains(&sample_count) {
        return Err(TargetError::Incomplete(format!(
            "{sample_count}x MSAA needs adapter-specific format features"
        )));
    }
    if !flags.sample_count_supported(sample_count) {
        return Err(TargetError::Incomplete(format!("{sample_count}x MSAA is not supported")));
    }
    if !flags.contains(wgpu::TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE) {
        return Err(TargetError::Incomplete("format cannot resolve multisampled images".into()));
    }
    Ok(())
}
