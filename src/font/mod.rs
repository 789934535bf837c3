//! Font handles, text shaping, and glyph rasterization.
//!
//! A `FontFace` pairs a shaping engine with a rasterizer for one font file.
//! `OpenTypeFace` is the real pairing (`rustybuzz` shaping over `swash`
//! rasterization, both borrowing the same owned font bytes). The pipeline in
//! `crate::raster` only talks to the trait.

mod opentype;
mod shaper;
#[cfg(test)]
pub(crate) mod test_face;

pub use opentype::OpenTypeFace;
pub use shaper::{ShapeOptions, parse_features};

use crate::engine::Session;
use crate::error::TextResult;

/// Fixed-point factor of shaper advances: 26.6, 64 units per pixel.
pub const FREETYPE_UNIT: i32 = 64;

/// Header metrics of a face, in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceHeader {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
}

/// A glyph as placed by the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph index within the face (not a Unicode codepoint).
    pub glyph_id: u32,
    /// Byte offset of the source cluster in the shaped text.
    pub cluster: u32,
    /// Horizontal advance in 26.6 units.
    pub x_advance: i32,
    /// Vertical advance in 26.6 units, mathematical y (up is positive).
    pub y_advance: i32,
}

/// A rendered glyph: 8-bit coverage plus FreeType-style placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels (also the row stride).
    pub width: i32,
    /// Number of rows.
    pub rows: i32,
    /// X bearing from the pen position (positive = right).
    pub left: i32,
    /// Y bearing from the baseline (positive = above).
    pub top: i32,
    /// Grayscale coverage, `width * rows` bytes, row-major.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Coverage at `(x, y)` within the bitmap.
    pub fn at(&self, x: i32, y: i32) -> u8 {
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// A loaded font: shapes text and renders glyphs through the shared session.
///
/// Implementations must not keep per-call state of their own; everything
/// mutable during a shape or render lives in the `Session`.
pub trait FontFace {
    /// Display name (usually the file path it came from).
    fn name(&self) -> &str;

    /// Header metrics in design units.
    fn header(&self) -> FaceHeader;

    /// Shape `text` left-to-right as Latin at `ysize` pixels.
    ///
    /// Advances are in 26.6 units (`FREETYPE_UNIT` per pixel).
    fn shape(
        &self,
        session: &mut Session,
        text: &str,
        ysize: u32,
        options: &ShapeOptions,
    ) -> TextResult<Vec<ShapedGlyph>>;

    /// Render one glyph at `ysize` pixels.
    fn render_glyph(
        &self,
        session: &mut Session,
        glyph_id: u32,
        ysize: u32,
    ) -> TextResult<GlyphBitmap>;
}
