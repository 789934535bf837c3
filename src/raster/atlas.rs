//! Grayscale image a string is rasterized into.
//!
//! The image starts at a power-of-two size guessed from the pixel size and
//! grows downward when rasterized glyphs widen the metrics. Growth keeps
//! already-blitted glyphs aligned with the (possibly lowered) baseline.

use super::round_up_pow2;
use crate::font::GlyphBitmap;
use crate::metrics::FontMetrics;

/// 8-bit coverage image, row-major, top-left origin, stride = width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasImage {
    /// A zeroed `width x height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not less than the image height.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Make room for `new` metrics after rendering with `old` ones.
    ///
    /// Content moves down by the growth in internal leading so it stays on
    /// the new baseline; growth in external leading only adds rows below.
    /// Returns `true` when the image was reallocated at a larger
    /// power-of-two height.
    pub fn expand(&mut self, old: &FontMetrics, new: &FontMetrics) -> bool {
        if old.total() == new.total() {
            return false;
        }

        let new_height = round_up_pow2(new.total().max(0) as u32);
        let shift = new.internal_leading() - old.internal_leading();
        // Internal leading is a running maximum within one pass.
        debug_assert!(shift >= 0, "internal leading shrank by {}", -shift);
        let width = self.width as usize;
        let offset = width * shift.max(0) as usize;
        let len = (width * old.total().max(0) as usize).min(self.pixels.len());

        if new_height != self.height {
            // Zero-initialized, so the top `shift` rows and everything below
            // the moved content start out clear.
            let mut grown = vec![0; width * new_height as usize];
            grown[offset..offset + len].copy_from_slice(&self.pixels[..len]);
            self.pixels = grown;
            self.height = new_height;
            return true;
        }

        if offset > 0 {
            self.pixels.copy_within(..len, offset);
            self.pixels[..offset].fill(0);
        }
        // Rows below the old total were never written, no clearing needed.
        false
    }

    /// Copy a glyph's coverage with its pen at `(pen_x, pen_y)` and its
    /// origin on `base_line` rows below `pen_y`.
    ///
    /// Source rows that would land above row 0 are skipped, as is anything
    /// outside the image.
    pub fn blit(&mut self, glyph: &GlyphBitmap, pen_x: i32, pen_y: i32, base_line: i32) {
        let width = self.width as i32;
        let height = self.height as i32;
        let y_offset = base_line - glyph.top;

        for y in 0..glyph.rows {
            if y_offset + y < 0 {
                continue;
            }
            let dst_y = pen_y + y + y_offset;
            if !(0..height).contains(&dst_y) {
                continue;
            }
            for x in 0..glyph.width {
                let dst_x = pen_x + x + glyph.left;
                if !(0..width).contains(&dst_x) {
                    continue;
                }
                self.pixels[(dst_y * width + dst_x) as usize] = glyph.at(x, y);
            }
        }
    }
}
