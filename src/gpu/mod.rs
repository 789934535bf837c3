//! Texture upload: the seam between rasterized strings and a renderer.

mod wgpu_uploader;

pub use wgpu_uploader::{GpuTexture, WgpuUploader, headless_device};

use crate::error::{TextError, TextResult};
use crate::metrics::FontMetrics;
use crate::raster::RasterizedText;

/// Turns single-channel 8-bit images into renderer textures.
pub trait TextureUploader {
    type Texture;

    /// Upload a `width x height` luminance image without mipmaps.
    fn upload_luminance(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> TextResult<Self::Texture>;
}

/// An uploaded string: the texture plus what's needed to draw it.
#[derive(Debug)]
pub struct FontTexture<T> {
    texture: T,
    width: u32,
    height: u32,
    string_width: u32,
    uv: [f32; 4],
    metrics: FontMetrics,
}

impl<T> FontTexture<T> {
    /// Upload `raster` through `uploader`.
    pub fn upload<U>(uploader: &mut U, raster: &RasterizedText) -> TextResult<Self>
    where
        U: TextureUploader<Texture = T>,
    {
        let image = &raster.image;
        let texture = uploader.upload_luminance(image.pixels(), image.width(), image.height())?;
        Ok(Self {
            texture,
            width: image.width(),
            height: image.height(),
            string_width: raster.string_width,
            uv: raster.uv(),
            metrics: raster.metrics,
        })
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Texture width in pixels (a power of two).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels (a power of two).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of the drawn string in pixels.
    pub fn string_width(&self) -> u32 {
        self.string_width
    }

    /// Used region as `(u0, v0, u1, v1)`.
    pub fn uv(&self) -> [f32; 4] {
        self.uv
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

/// A texture kept in CPU memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Uploader that keeps textures in memory (image export, headless use).
#[derive(Debug, Default)]
pub struct MemoryUploader {
    uploads: usize,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures created so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl TextureUploader for MemoryUploader {
    type Texture = CpuTexture;

    fn upload_luminance(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> TextResult<CpuTexture> {
        if pixels.len() != width as usize * height as usize {
            return Err(TextError::Upload(format!(
                "{} bytes for a {width}x{height} image",
                pixels.len()
            )));
        }
        self.uploads += 1;
        Ok(CpuTexture {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }
}
