//! Window surface, device and queue.

use std::fmt;

/// Why the GPU could not be brought up for the window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused to open a device.
    Device(wgpu::RequestDeviceError),
    /// The adapter reports no usable format for the surface.
    NoSurfaceFormat,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::NoAdapter(e) => write!(f, "no GPU adapter for this window: {e}"),
            Self::Device(e) => write!(f, "cannot open GPU device: {e}"),
            Self::NoSurfaceFormat => write!(f, "window surface has no supported format"),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::NoAdapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// Prefer an sRGB swapchain so texture colors and clear colors match
/// between the display and the offscreen monochrome target.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// The GPU device bound to the viewer window.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    /// Presentation surface of the window.
    pub surface: wgpu::Surface<'static>,
    /// Swapchain format, size and present mode.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device that can present to `window`, sized `initial_size`
    /// (zero dimensions are raised to 1).
    ///
    /// Validation errors the device raises later are logged rather than
    /// aborting the process.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] when any setup step fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::NoAdapter)?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Shadelab Device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::Device)?;
        device.on_uncaptured_error(Box::new(|error| log::error!("GPU error: {error}")));

        let capabilities = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&capabilities.formats)
            .ok_or(RenderContextError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: initial_size.0.max(1),
            height: initial_size.1.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);
        log::debug!("surface {}x{} {format:?}", config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Swapchain texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Surface height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Viewport aspect ratio for the projection.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Follow a window resize. A minimized window (a zero dimension) keeps
    /// the old configuration; returns whether the surface was reconfigured.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    /// Next swapchain image.
    ///
    /// # Errors
    ///
    /// Passes through [`wgpu::SurfaceError`]; `Lost` and `Outdated` call
    /// for a [`resize`](Self::resize).
    pub fn acquire_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame's passes.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish `encoder` and queue it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_format_is_preferred() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            pick_surface_format(&formats),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [wgpu::TextureFormat::Rgba16Float];
        assert_eq!(
            pick_surface_format(&formats),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }
}
