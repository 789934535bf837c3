//! `wgpu` uploader: one `R8Unorm` texture per string.

use crate::error::{TextError, TextResult};

use super::TextureUploader;

/// A GPU texture holding one rasterized string.
#[derive(Debug)]
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

/// Creates and fills textures on a `wgpu` device.
pub struct WgpuUploader {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuUploader {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

impl TextureUploader for WgpuUploader {
    type Texture = GpuTexture;

    fn upload_luminance(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> TextResult<GpuTexture> {
        if pixels.len() != width as usize * height as usize {
            return Err(TextError::Upload(format!(
                "{} bytes for a {width}x{height} image",
                pixels.len()
            )));
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("font_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(GpuTexture { texture, view })
    }
}

/// Request a device and queue without a surface, for offscreen use.
pub fn headless_device() -> TextResult<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .map_err(|e| TextError::Gpu(e.to_string()))?;

    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("ori_text"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_defaults(),
        ..Default::default()
    }))
    .map_err(|e| TextError::Gpu(e.to_string()))
}
