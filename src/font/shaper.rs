//! Text shaping via `rustybuzz` through the session's reusable buffer.

use std::str::FromStr;

use rustybuzz::{Direction, Feature, Language, UnicodeBuffer};

use super::{FREETYPE_UNIT, ShapedGlyph};
use crate::engine::Session;

/// Shaper settings applied to every string.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    /// BCP-47 language tag. When `None` the tag is parsed from the text
    /// being shaped itself, which is almost never a real tag.
    // TODO: default to no language once callers that depend on the
    // text-derived tag have migrated to setting it explicitly.
    pub language: Option<String>,
    /// OpenType features; empty shapes with the font's defaults.
    pub features: Vec<Feature>,
}

impl ShapeOptions {
    /// Language to tag the buffer with when shaping `text`.
    pub fn language_for(&self, text: &str) -> Option<Language> {
        let tag = self.language.as_deref().unwrap_or(text);
        Language::from_str(tag).ok()
    }
}

/// Parse feature strings into rustybuzz features.
///
/// Each string is a 4-char OpenType tag, optionally prefixed with `-` to
/// disable. Examples: `"liga"` (enable), `"-kern"` (disable).
pub fn parse_features(strings: &[String]) -> Vec<Feature> {
    strings
        .iter()
        .filter_map(|s| {
            let (tag_str, value) = if let Some(rest) = s.strip_prefix('-') {
                (rest, 0)
            } else {
                (s.as_str(), 1)
            };
            let Ok(bytes) = <[u8; 4]>::try_from(tag_str.as_bytes()) else {
                log::warn!("shaper: ignoring invalid feature tag: {s}");
                return None;
            };
            let tag = rustybuzz::ttf_parser::Tag::from_bytes(&bytes);
            Some(Feature::new(tag, value, ..))
        })
        .collect()
}

/// Convert a shaper value in design units to 26.6 units of whole pixels.
///
/// Advances are rounded to the pixel grid the way a hinting rasterizer
/// reports them.
pub(super) fn to_freetype_units(value: i32, ysize: u32, units_per_em: u16) -> i32 {
    let px = (value as f32 * ysize as f32 / f32::from(units_per_em.max(1))).round() as i32;
    px * FREETYPE_UNIT
}

/// Shape `text` with `face` using the session's buffer.
///
/// The buffer is handed back to the session cleared, so the next shape
/// starts from an empty buffer even if rasterization later fails.
pub(super) fn shape_with(
    face: &rustybuzz::Face<'_>,
    session: &mut Session,
    text: &str,
    ysize: u32,
    options: &ShapeOptions,
) -> Vec<ShapedGlyph> {
    let mut buffer: UnicodeBuffer = session.take_buffer();
    buffer.push_str(text);
    buffer.set_direction(Direction::LeftToRight);
    buffer.set_script(rustybuzz::script::LATIN);
    if let Some(language) = options.language_for(text) {
        buffer.set_language(language);
    }

    let glyph_buffer = rustybuzz::shape(face, &options.features, buffer);
    let upem = (**face).units_per_em();

    let glyphs = glyph_buffer
        .glyph_infos()
        .iter()
        .zip(glyph_buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: to_freetype_units(pos.x_advance, ysize, upem),
            y_advance: to_freetype_units(pos.y_advance, ysize, upem),
        })
        .collect();

    session.restore_buffer(glyph_buffer.clear());
    glyphs
}
