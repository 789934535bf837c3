//! Deterministic face for pipeline tests.
//!
//! Header: 1000 units per em, ascender 800, descender -200, so at 20px the
//! ascender is 16 and the descender -4. Glyph bitmaps are authored for 20px
//! and filled with a per-glyph coverage value so tests can tell them apart.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use super::{FREETYPE_UNIT, FaceHeader, FontFace, GlyphBitmap, ShapeOptions, ShapedGlyph};
use crate::engine::Session;
use crate::error::{TextError, TextResult};

/// Glyph ids of the test face.
pub(crate) const NOTDEF: u32 = 0;
pub(crate) const CAP_A: u32 = 1;
pub(crate) const LOWER_G: u32 = 2;
pub(crate) const A_RING: u32 = 3;
pub(crate) const CAP_M: u32 = 4;
pub(crate) const SPACE: u32 = 5;

/// Coverage values per glyph.
pub(crate) const INK_A: u8 = 0xA0;
pub(crate) const INK_G: u8 = 0x60;
pub(crate) const INK_A_RING: u8 = 0xC5;
pub(crate) const INK_M: u8 = 0xFF;

/// `(advance px, width, rows, left, top, ink)` per glyph id.
const GLYPHS: [(i32, i32, i32, i32, i32, u8); 6] = [
    (12, 0, 0, 0, 0, 0),               // .notdef, never renders
    (12, 10, 14, 1, 14, INK_A),        // A: sits on the baseline, cap height 14
    (12, 10, 24, 1, 4, INK_G),         // g: drops 20px below the baseline
    (12, 10, 20, 1, 20, INK_A_RING),   // Å: rises 4px above the ascender
    (16, 16, 14, 0, 14, INK_M),        // M: ink fills the whole advance
    (6, 0, 0, 0, 0, 0),                // space
];

pub(crate) struct TestFace {
    shape_calls: Rc<Cell<usize>>,
}

impl TestFace {
    pub(crate) fn new() -> Self {
        Self {
            shape_calls: Rc::new(Cell::new(0)),
        }
    }

    /// Face plus a counter of `shape` calls that stays readable after the
    /// face is boxed into a manager.
    pub(crate) fn with_counter() -> (Self, Rc<Cell<usize>>) {
        let face = Self::new();
        let counter = Rc::clone(&face.shape_calls);
        (face, counter)
    }

    pub(crate) fn glyph_for(ch: char) -> u32 {
        match ch {
            'A' => CAP_A,
            'g' => LOWER_G,
            'Å' => A_RING,
            'M' => CAP_M,
            ' ' => SPACE,
            _ => NOTDEF,
        }
    }

    pub(crate) fn advance_px(glyph_id: u32) -> i32 {
        GLYPHS[glyph_id as usize].0
    }
}

impl FontFace for TestFace {
    fn name(&self) -> &str {
        "test-face"
    }

    fn header(&self) -> FaceHeader {
        FaceHeader {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
        }
    }

    fn shape(
        &self,
        _session: &mut Session,
        text: &str,
        _ysize: u32,
        _options: &ShapeOptions,
    ) -> TextResult<Vec<ShapedGlyph>> {
        self.shape_calls.set(self.shape_calls.get() + 1);
        Ok(text
            .char_indices()
            .map(|(i, ch)| {
                let glyph_id = Self::glyph_for(ch);
                ShapedGlyph {
                    glyph_id,
                    cluster: i as u32,
                    x_advance: Self::advance_px(glyph_id) * FREETYPE_UNIT,
                    y_advance: 0,
                }
            })
            .collect())
    }

    fn render_glyph(
        &self,
        _session: &mut Session,
        glyph_id: u32,
        _ysize: u32,
    ) -> TextResult<GlyphBitmap> {
        if glyph_id == NOTDEF || glyph_id as usize >= GLYPHS.len() {
            return Err(TextError::GlyphLoad { glyph_id });
        }
        let (_, width, rows, left, top, ink) = GLYPHS[glyph_id as usize];
        Ok(GlyphBitmap {
            width,
            rows,
            left,
            top,
            coverage: vec![ink; (width * rows) as usize],
        })
    }
}

/// A system font to run real-engine tests against, if one is installed.
pub(crate) fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}
