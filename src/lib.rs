//! Text-to-texture rasterization.
//!
//! A [`FontManager`] opens one font, shapes strings with `rustybuzz`,
//! rasterizes the glyphs with `swash` onto a power-of-two grayscale image,
//! and uploads the image as a texture. Textures are cached per string until
//! the font is closed.

pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod gpu;
pub mod manager;
pub mod metrics;
pub mod raster;

pub use engine::Engine;
pub use error::{TextError, TextResult};
pub use font::{FontFace, OpenTypeFace, ShapeOptions};
pub use gpu::{CpuTexture, FontTexture, MemoryUploader, TextureUploader, WgpuUploader};
pub use manager::FontManager;
pub use metrics::FontMetrics;
pub use raster::{RasterizedText, TextOptions};
