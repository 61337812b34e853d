//! Image textures, cube maps and render targets.
//!
//! Loading never fails the caller: a file that cannot be read or decoded is
//! reported through `log::error!` and replaced by a placeholder, so a
//! missing asset shows up as a wrong-looking surface rather than a crash.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use super::render_context::RenderContext;
use crate::error::ViewerError;

/// Depth buffer format used by every scene pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// How a 2D image's texels are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Diffuse color in sRGB.
    Color,
    /// Linear data such as normal or height maps.
    Data,
}

/// GPU texel layout chosen from an image's channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexelLayout {
    /// One channel, stored as-is.
    Single,
    /// Two to four channels, expanded to RGBA.
    Rgba,
}

impl TexelLayout {
    /// Pick a layout for an image with `channels` channels.
    #[must_use]
    pub fn from_channels(channels: u8) -> Self {
        if channels == 1 {
            Self::Single
        } else {
            Self::Rgba
        }
    }

    /// Texture format for this layout and interpretation.
    #[must_use]
    pub fn format(self, kind: TextureKind) -> wgpu::TextureFormat {
        match (self, kind) {
            (Self::Single, _) => wgpu::TextureFormat::R8Unorm,
            (Self::Rgba, TextureKind::Color) => wgpu::TextureFormat::Rgba8UnormSrgb,
            (Self::Rgba, TextureKind::Data) => wgpu::TextureFormat::Rgba8Unorm,
        }
    }

    /// Bytes per texel.
    #[must_use]
    pub fn bytes_per_texel(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Rgba => 4,
        }
    }

    fn texels(self, image: &DynamicImage) -> Vec<u8> {
        match self {
            Self::Single => image.to_luma8().into_raw(),
            Self::Rgba => image.to_rgba8().into_raw(),
        }
    }
}

/// Number of mip levels in a full chain down to 1x1.
#[must_use]
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// A sampled texture and its default view.
pub struct Texture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A view covering every mip level (and every face for cube maps).
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Load a 2D image with a full mip chain, falling back to a 1x1
    /// placeholder (mid grey for color, flat for data) when it can't be read.
    #[must_use]
    pub fn load_2d(context: &RenderContext, path: &Path, kind: TextureKind) -> Self {
        match open_image(path) {
            Ok(image) => {
                log::debug!(
                    "loaded {} ({}x{}, {} channels)",
                    path.display(),
                    image.width(),
                    image.height(),
                    image.color().channel_count()
                );
                Self::from_image(context, &path.display().to_string(), &image, kind)
            }
            Err(e) => {
                log::error!("{e}");
                let texel = match kind {
                    TextureKind::Color => [128, 128, 128, 255],
                    TextureKind::Data => [128, 128, 255, 255],
                };
                Self::solid(context, "Placeholder", texel, kind)
            }
        }
    }

    /// Upload a decoded image with a CPU-generated mip chain.
    #[must_use]
    pub fn from_image(
        context: &RenderContext,
        label: &str,
        image: &DynamicImage,
        kind: TextureKind,
    ) -> Self {
        let layout = TexelLayout::from_channels(image.color().channel_count());
        let (width, height) = (image.width().max(1), image.height().max(1));
        let mip_count = mip_level_count(width, height);

        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: layout.format(kind),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level = image.clone();
        for mip in 0..mip_count {
            if mip > 0 {
                let w = (width >> mip).max(1);
                let h = (height >> mip).max(1);
                level = level.resize_exact(w, h, FilterType::Triangle);
            }
            write_layer(context, &texture, mip, 0, layout, &level);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// A 1x1 texture of a single texel.
    #[must_use]
    pub fn solid(
        context: &RenderContext,
        label: &str,
        rgba: [u8; 4],
        kind: TextureKind,
    ) -> Self {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            1,
            1,
            image::Rgba(rgba),
        ));
        Self::from_image(context, label, &image, kind)
    }

    /// Load a cube map from six faces in +X, -X, +Y, -Y, +Z, -Z order.
    ///
    /// Faces that fail to load are reported and left black; faces whose size
    /// differs from the first readable face are resized to match.
    #[must_use]
    pub fn load_cube<P: AsRef<Path>>(context: &RenderContext, faces: &[P; 6]) -> Self {
        let images: Vec<Option<DynamicImage>> = faces
            .iter()
            .map(|path| {
                open_image(path.as_ref())
                    .map_err(|e| log::error!("{e}"))
                    .ok()
            })
            .collect();

        let (width, height) = images
            .iter()
            .flatten()
            .next()
            .map_or((1, 1), |img| (img.width().max(1), img.height().max(1)));

        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Skybox Cube Map"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, face) in images.into_iter().enumerate() {
            let face = match face {
                Some(img) if img.width() == width && img.height() == height => img,
                Some(img) => img.resize_exact(width, height, FilterType::Triangle),
                None => DynamicImage::ImageRgba8(image::RgbaImage::new(width, height)),
            };
            write_layer(context, &texture, 0, layer as u32, TexelLayout::Rgba, &face);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Skybox Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        Self { texture, view }
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, ViewerError> {
    image::open(path)
        .map_err(|e| ViewerError::AssetLoad(format!("unable to load {}: {e}", path.display())))
}

fn write_layer(
    context: &RenderContext,
    texture: &wgpu::Texture,
    mip_level: u32,
    layer: u32,
    layout: TexelLayout,
    image: &DynamicImage,
) {
    let (width, height) = (image.width(), image.height());
    context.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
        },
        &layout.texels(image),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(layout.bytes_per_texel() * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// A render-target texture and its default view.
///
/// The texture is created with `RENDER_ATTACHMENT | TEXTURE_BINDING` usage,
/// making it suitable for off-screen rendering followed by sampling in a
/// screen-space pass.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        (width, height): (u32, u32),
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// A depth buffer in [`DEPTH_FORMAT`].
    #[must_use]
    pub fn depth(device: &wgpu::Device, size: (u32, u32)) -> Self {
        Self::new(device, "Depth Buffer", size, DEPTH_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_count_selects_format() {
        assert_eq!(
            TexelLayout::from_channels(1).format(TextureKind::Color),
            wgpu::TextureFormat::R8Unorm
        );
        assert_eq!(
            TexelLayout::from_channels(3).format(TextureKind::Color),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            TexelLayout::from_channels(4).format(TextureKind::Data),
            wgpu::TextureFormat::Rgba8Unorm
        );
    }

    #[test]
    fn rgb_images_expand_to_rgba() {
        let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 1, image::Rgb([1, 2, 3])));
        let layout = TexelLayout::from_channels(rgb.color().channel_count());
        assert_eq!(layout.texels(&rgb), vec![1, 2, 3, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn mip_chain_reaches_one_texel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(512, 128), 10);
        assert_eq!(mip_level_count(300, 7), 9);
    }

    #[test]
    fn missing_file_is_asset_error() {
        let err = open_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ViewerError::AssetLoad(ref msg) if msg.contains("here.png")));
    }
}
