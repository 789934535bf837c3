//! Shape-and-rasterize: turns one string into a grayscale image plus metrics.

mod atlas;
mod pipeline;

pub use atlas::AtlasImage;
pub use pipeline::rasterize_text;

use crate::font::ShapeOptions;
use crate::metrics::FontMetrics;

/// Per-manager layout settings.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// Pixels of padding around each glyph (0 packs glyphs edge to edge).
    pub padding: u32,
    pub shaping: ShapeOptions,
}

/// Output of one rasterization pass, ready for upload.
#[derive(Debug, Clone)]
pub struct RasterizedText {
    /// Power-of-two image, `width * height` bytes of 8-bit coverage.
    pub image: AtlasImage,
    /// Sum of shaped advances in pixels; the used width of `image`.
    pub string_width: u32,
    pub metrics: FontMetrics,
    /// Number of glyphs the shaper produced.
    pub glyph_count: usize,
}

impl RasterizedText {
    /// UV rectangle `(u0, v0, u1, v1)` of the used region.
    pub fn uv(&self) -> [f32; 4] {
        [
            0.0,
            0.0,
            self.string_width as f32 / self.image.width() as f32,
            self.metrics.total() as f32 / self.image.height() as f32,
        ]
    }
}

/// Smallest power of two >= `n`, never less than 1.
pub fn round_up_pow2(n: u32) -> u32 {
    n.max(1).next_power_of_two()
}
