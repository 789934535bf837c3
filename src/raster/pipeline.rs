//! Shape a string, rasterize each glyph, and lay the glyphs out on one image.
//!
//! The image height isn't known until every glyph has been rendered: a glyph
//! that rises above the face ascender or drops below the descender widens
//! the metrics, and the image grows (moving what's already drawn) to match.

use super::{AtlasImage, RasterizedText, TextOptions, round_up_pow2};
use crate::engine::Session;
use crate::error::{TextError, TextResult};
use crate::font::{FREETYPE_UNIT, FontFace};
use crate::metrics::FontMetrics;

/// Rasterize `text` at `ysize` pixels into a fresh image.
///
/// Glyphs are laid out left to right on a line `ysize` pixels tall, wrapping
/// to the next line when a glyph would reach the right edge. Fails if any
/// glyph can't be rendered or the wrapped text runs off the bottom.
pub fn rasterize_text(
    face: &dyn FontFace,
    session: &mut Session,
    text: &str,
    ysize: u32,
    options: &TextOptions,
) -> TextResult<RasterizedText> {
    if ysize == 0 {
        return Err(TextError::InvalidSize(ysize));
    }

    session.record_shape_pass();
    let glyphs = face.shape(session, text, ysize, &options.shaping)?;

    let header = face.header();
    let line_height = ysize as i32;
    let ascender =
        (i64::from(ysize) * i64::from(header.ascender) / i64::from(header.units_per_em.max(1))) as i32;
    let mut metrics = FontMetrics::new(ascender, 0, ascender, ascender - line_height, 0);

    let advance_units: i32 = glyphs.iter().map(|g| g.x_advance).sum();
    let string_width = (advance_units / FREETYPE_UNIT).max(0) as u32;
    let mut image = AtlasImage::new(round_up_pow2(string_width), round_up_pow2(ysize));
    let width = image.width() as i32;

    let pad = options.padding as i32;
    let mut pen_x = pad;
    let mut pen_y = pad;

    for glyph in &glyphs {
        let bitmap = face.render_glyph(session, glyph.glyph_id, ysize)?;

        if metrics.exceeded_by(bitmap.top, bitmap.rows) {
            let widened = metrics.widened_for(bitmap.top, bitmap.rows);
            if widened.total() != metrics.total() && image.expand(&metrics, &widened) {
                log::trace!(
                    "raster: grew {text:?} to {}x{}",
                    image.width(),
                    image.height()
                );
            }
            metrics = widened;
        }

        if pen_x + bitmap.width + bitmap.left >= width - pad {
            pen_y += line_height + pad;
            pen_x = pad;
        }

        let height = image.height() as i32;
        if pen_y + metrics.base_line() + bitmap.rows - bitmap.top >= height - pad {
            return Err(TextError::AtlasOverflow {
                text: text.to_owned(),
                width: image.width(),
                height: image.height(),
            });
        }

        image.blit(&bitmap, pen_x, pen_y, metrics.base_line());

        // Horizontal Latin text only; a vertical advance would walk the pen
        // off the line.
        debug_assert_eq!(glyph.y_advance, 0, "vertical advance in horizontal text");
        pen_x += glyph.x_advance / FREETYPE_UNIT + pad;
        // Shaper y points up, image y points down.
        pen_y -= glyph.y_advance / FREETYPE_UNIT;
    }

    Ok(RasterizedText {
        image,
        string_width,
        metrics,
        glyph_count: glyphs.len(),
    })
}
