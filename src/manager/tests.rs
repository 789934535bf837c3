//! Font manager tests against the deterministic test face.

use super::*;
use crate::font::test_face::{INK_A, TestFace, system_font};
use crate::gpu::{CpuTexture, MemoryUploader};
use crate::metrics::FontMetrics;
use crate::raster::TextOptions;

fn manager() -> FontManager<MemoryUploader> {
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    m.open_face(Box::new(TestFace::new())).expect("open test face");
    m
}

fn padded_manager(padding: u32) -> FontManager<MemoryUploader> {
    let options = TextOptions {
        padding,
        ..TextOptions::default()
    };
    let mut m = FontManager::with_options(Engine::new(), MemoryUploader::new(), options);
    m.open_face(Box::new(TestFace::new())).expect("open test face");
    m
}

fn row(tex: &CpuTexture, y: u32) -> &[u8] {
    let start = (y * tex.width) as usize;
    &tex.pixels[start..start + tex.width as usize]
}

#[test]
fn single_glyph_texture() {
    let mut m = manager();
    let tex = m.get_texture("A", 20).expect("A");
    assert_eq!(tex.width(), 16);
    assert_eq!(tex.height(), 32);
    assert_eq!(tex.string_width(), 12);
    assert_eq!(*tex.metrics(), FontMetrics::new(16, 0, 16, -4, 0));
    assert_eq!(tex.uv(), [0.0, 0.0, 0.75, 0.625]);

    let cpu = tex.texture();
    assert_eq!((cpu.width, cpu.height), (16, 32));
    // Bottom row of ink is the row just above the baseline.
    assert!(row(cpu, 15).contains(&INK_A));
    assert!(!row(cpu, 16).contains(&INK_A));
}

#[test]
fn descender_texture_is_taller() {
    let mut m = manager();
    let tex = m.get_texture("Ag", 20).expect("Ag");
    assert_eq!(tex.height(), 64);
    assert_eq!(tex.metrics().total(), 36);
    assert_eq!(tex.uv()[3], 36.0 / 64.0);
}

#[test]
fn diacritic_texture_has_internal_leading() {
    let mut m = manager();
    let tex = m.get_texture("Å", 20).expect("Å");
    assert_eq!(tex.metrics().internal_leading(), 4);
    assert_eq!(tex.metrics().base_line(), 20);
    assert_eq!(tex.height(), 32);
}

#[test]
fn cache_hit_returns_same_texture_without_shaping() {
    let (face, shape_calls) = TestFace::with_counter();
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    m.open_face(Box::new(face)).expect("open");

    let first: *const FontTexture<CpuTexture> = m.get_texture("A", 20).expect("A");
    assert_eq!(shape_calls.get(), 1);
    let second: *const FontTexture<CpuTexture> = m.get_texture("A", 20).expect("A again");
    assert!(std::ptr::eq(first, second));
    assert_eq!(shape_calls.get(), 1, "cache hit must not shape");
    assert_eq!(m.engine().lock().shape_passes(), 1);
    assert_eq!(m.uploader().uploads(), 1);
    assert_eq!(m.cached_count(), 1);
}

#[test]
fn cache_key_ignores_size() {
    let mut m = manager();
    let small = m.get_texture("A", 20).expect("A").height();
    let again = m.get_texture("A", 40).expect("A at 40").height();
    assert_eq!(small, again);
    assert_eq!(m.uploader().uploads(), 1);
}

#[test]
fn distinct_strings_get_distinct_textures() {
    let mut m = manager();
    m.get_texture("A", 20).expect("A");
    m.get_texture("AA", 20).expect("AA");
    m.get_texture("A ", 20).expect("A space");
    assert_eq!(m.cached_count(), 3);
    assert_eq!(m.cached("AA").map(FontTexture::string_width), Some(24));
    assert_eq!(m.cached("A ").map(FontTexture::string_width), Some(18));
}

#[test]
fn empty_string_texture() {
    let mut m = manager();
    let tex = m.get_texture("", 20).expect("empty string");
    assert_eq!(tex.string_width(), 0);
    assert_eq!(tex.uv()[2], 0.0);
    assert_eq!(tex.width(), 1);
    assert_eq!(tex.height(), 32);
}

#[test]
fn dimensions_are_powers_of_two() {
    let mut m = manager();
    for text in ["A", "Ag", "Å", "AgÅ", "MA", "A A A", ""] {
        let tex = m.get_texture(text, 20).expect(text);
        assert!(tex.width().is_power_of_two(), "{text:?} width");
        assert!(tex.height().is_power_of_two(), "{text:?} height");
        assert!(tex.string_width() <= tex.width());
        assert!(tex.metrics().total() as u32 <= tex.height());
        for uv in tex.uv() {
            assert!((0.0..=1.0).contains(&uv), "{text:?} uv {uv}");
        }
    }
}

#[test]
fn overflow_is_not_cached() {
    let mut m = padded_manager(2);
    let err = m.get_texture("AAAAA", 20).err().expect("second line overflows");
    assert!(matches!(err, TextError::AtlasOverflow { .. }));
    assert_eq!(m.cached_count(), 0);
    assert_eq!(m.uploader().uploads(), 0);

    // Same failure on retry; nothing was left behind.
    assert!(m.get_texture("AAAAA", 20).is_err());
    assert_eq!(m.cached_count(), 0);
}

#[test]
fn wrapped_text_fits_when_taller() {
    let mut m = padded_manager(2);
    let tex = m.get_texture("gAAAA", 20).expect("wraps onto a second line");
    assert_eq!(tex.height(), 64);
    let cpu = tex.texture();
    // Second line starts at the left padding, 22 rows below the first.
    assert_eq!(row(cpu, 30)[2], 0);
    assert_eq!(row(cpu, 30)[3], INK_A);
}

#[test]
fn missing_glyph_is_not_cached() {
    let mut m = manager();
    let err = m.get_texture("A#", 20).err().expect("'#' is missing");
    assert!(matches!(err, TextError::GlyphLoad { .. }));
    assert!(m.cached("A#").is_none());
    // The shaping buffer was handed back; the next string shapes normally.
    assert!(m.get_texture("A", 20).is_ok());
}

#[test]
fn zero_size_is_rejected() {
    let mut m = manager();
    let err = m.get_texture("A", 0).err().expect("zero size");
    assert!(matches!(err, TextError::InvalidSize(0)));
}

#[test]
fn get_texture_without_font() {
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    let err = m.get_texture("A", 20).err().expect("no font");
    assert!(matches!(err, TextError::NoFontOpen));
}

#[test]
fn open_twice_fails() {
    let mut m = manager();
    let err = m
        .open_face(Box::new(TestFace::new()))
        .expect_err("already open");
    assert!(matches!(err, TextError::FontAlreadyOpen { ref name } if name == "test-face"));
    assert_eq!(m.font_name(), Some("test-face"));
}

#[test]
fn open_missing_file_leaves_manager_closed() {
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    let err = m.open("/nonexistent/font.ttf").expect_err("missing");
    assert!(matches!(err, TextError::FontLoad { .. }));
    assert!(!m.is_open());
}

#[test]
fn open_garbage_bytes_fails() {
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    let err = m.open_bytes("junk", vec![1, 2, 3]).expect_err("not a font");
    assert!(matches!(err, TextError::FontParse { .. }));
    assert!(!m.is_open());
}

#[test]
fn close_without_font_fails() {
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    assert!(matches!(m.close(), Err(TextError::NoFontOpen)));
    assert!(!m.is_open());
}

#[test]
fn close_releases_textures() {
    let mut m = manager();
    m.get_texture("A", 20).expect("A");
    m.get_texture("Ag", 20).expect("Ag");
    assert_eq!(m.cached_count(), 2);

    m.close().expect("close");
    assert!(!m.is_open());
    assert_eq!(m.cached_count(), 0);
    assert!(m.cached("A").is_none());
    assert!(matches!(m.close(), Err(TextError::NoFontOpen)));

    // Reopening starts from an empty cache.
    m.open_face(Box::new(TestFace::new())).expect("reopen");
    m.get_texture("A", 20).expect("A");
    assert_eq!(m.uploader().uploads(), 3);
}

#[test]
fn managers_share_one_session() {
    let engine = Engine::new();
    let mut a = FontManager::new(engine.clone(), MemoryUploader::new());
    let mut b = FontManager::new(engine.clone(), MemoryUploader::new());
    a.open_face(Box::new(TestFace::new())).expect("open a");
    b.open_face(Box::new(TestFace::new())).expect("open b");
    assert_eq!(engine.handle_count(), 3);

    a.get_texture("A", 20).expect("a");
    b.get_texture("A", 20).expect("b");
    assert_eq!(engine.lock().shape_passes(), 2);

    assert!(matches!(
        engine.clone().terminate(),
        Err(TextError::EngineInUse { handles: 3 })
    ));
    drop(a);
    drop(b);
    assert_eq!(engine.handle_count(), 1);
    assert!(engine.terminate().is_ok());
}

#[test]
fn real_font_texture() {
    let Some(path) = system_font() else {
        return;
    };
    let mut m = FontManager::new(Engine::new(), MemoryUploader::new());
    m.open(&path).expect("system font opens");
    let tex = m.get_texture("Hello", 24).expect("Hello");
    assert!(tex.string_width() > 0);
    assert!(tex.width().is_power_of_two() && tex.height().is_power_of_two());
    assert!(tex.metrics().base_line() > 0);
    assert!(tex.metrics().descender() < 0);
    assert!(tex.texture().pixels.iter().any(|&p| p > 0));
    let uv = tex.uv();
    assert!(uv[2] > 0.0 && uv[2] <= 1.0);
    assert!(uv[3] > 0.0 && uv[3] <= 1.0);
}
