//! OpenType/TrueType face. Owns raw bytes, swash identifiers, and creates
//! transient rustybuzz faces for shaping.

use std::path::Path;
use std::sync::Arc;

use swash::scale::image::Image;
use swash::scale::{Render, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use super::shaper::shape_with;
use super::{FaceHeader, FontFace, GlyphBitmap, ShapeOptions, ShapedGlyph};
use crate::engine::Session;
use crate::error::{TextError, TextResult};

/// A font file opened for shaping and rasterization.
///
/// The bytes are kept in an `Arc<Vec<u8>>` so swash `FontRef`s and
/// rustybuzz `Face`s can borrow them for the duration of one call; both are
/// dropped before the bytes are.
pub struct OpenTypeFace {
    name: String,
    /// Raw font file bytes.
    bytes: Arc<Vec<u8>>,
    /// Index within a .ttc collection (always 0 here).
    face_index: u32,
    /// Byte offset to the table directory (from `FontRef::from_index`).
    offset: u32,
    /// Scaler cache key, stable for the lifetime of this face.
    cache_key: CacheKey,
    header: FaceHeader,
    glyph_count: u32,
}

impl OpenTypeFace {
    /// Read a font file from disk and open its first face.
    pub fn load(path: impl AsRef<Path>) -> TextResult<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| TextError::FontLoad {
            name: name.clone(),
            source,
        })?;
        Self::from_bytes(name, bytes)
    }

    /// Open the first face of an in-memory font file.
    ///
    /// Fails with `FontParse` if the rasterizer can't read the face and with
    /// `ShaperPairing` if the shaper can't; the bytes are dropped either way.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> TextResult<Self> {
        let name = name.into();
        let face_index = 0;

        let Some(font) = FontRef::from_index(&bytes, face_index as usize) else {
            return Err(TextError::FontParse { name });
        };
        let (offset, cache_key) = (font.offset, font.key);

        let Some(shaping) = rustybuzz::Face::from_slice(&bytes, face_index) else {
            return Err(TextError::ShaperPairing { name });
        };
        let header = FaceHeader {
            units_per_em: (*shaping).units_per_em(),
            ascender: shaping.ascender(),
            descender: shaping.descender(),
        };
        let glyph_count = u32::from(shaping.number_of_glyphs());
        drop(shaping);

        log::debug!(
            "font: opened {name} (upem {}, {glyph_count} glyphs)",
            header.units_per_em
        );

        Ok(Self {
            name,
            bytes: Arc::new(bytes),
            face_index,
            offset,
            cache_key,
            header,
            glyph_count,
        })
    }

    /// Number of glyphs in the face.
    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Transient swash `FontRef` over the stored bytes.
    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        }
    }
}

impl FontFace for OpenTypeFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn header(&self) -> FaceHeader {
        self.header
    }

    fn shape(
        &self,
        session: &mut Session,
        text: &str,
        ysize: u32,
        options: &ShapeOptions,
    ) -> TextResult<Vec<ShapedGlyph>> {
        let face = rustybuzz::Face::from_slice(&self.bytes, self.face_index).ok_or_else(|| {
            TextError::ShaperPairing {
                name: self.name.clone(),
            }
        })?;
        Ok(shape_with(&face, session, text, ysize, options))
    }

    fn render_glyph(
        &self,
        session: &mut Session,
        glyph_id: u32,
        ysize: u32,
    ) -> TextResult<GlyphBitmap> {
        if glyph_id >= self.glyph_count {
            return Err(TextError::GlyphLoad { glyph_id });
        }
        let id = u16::try_from(glyph_id).map_err(|_| TextError::GlyphLoad { glyph_id })?;

        let mut scaler = session
            .scale_context()
            .builder(self.font_ref())
            .size(ysize as f32)
            .hint(true)
            .build();

        // Blank glyphs (space) come back as an empty image; `None` means the
        // glyph has no outline to render.
        let rendered = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, id);
        bitmap_from(glyph_id, rendered)
    }
}

fn bitmap_from(glyph_id: u32, rendered: Option<Image>) -> TextResult<GlyphBitmap> {
    let Some(image) = rendered else {
        return Err(TextError::GlyphLoad { glyph_id });
    };
    Ok(GlyphBitmap {
        width: image.placement.width as i32,
        rows: image.placement.height as i32,
        left: image.placement.left,
        top: image.placement.top,
        coverage: image.data,
    })
}
