//! Font manager: one open font, a shared engine session, and a cache of
//! per-string textures.
//!
//! `get_texture()` is the main entry point: a cache hit returns the stored
//! texture without shaping; a miss shapes and rasterizes the string, uploads
//! the image, and keeps the texture until `close()`.
//!
//! Not reentrant: every call locks the shared session for its whole
//! shape-and-rasterize pass.

mod cache;

pub use cache::TextureCache;

use std::path::Path;

use crate::engine::Engine;
use crate::error::{TextError, TextResult};
use crate::font::{FontFace, OpenTypeFace};
use crate::gpu::{FontTexture, TextureUploader};
use crate::raster::{TextOptions, rasterize_text};

/// Rasterizes strings with one font into cached textures.
pub struct FontManager<U: TextureUploader> {
    /// Textures go before the face they were drawn with.
    textures: TextureCache<U::Texture>,
    face: Option<Box<dyn FontFace>>,
    uploader: U,
    engine: Engine,
    options: TextOptions,
}

impl<U: TextureUploader> FontManager<U> {
    /// A manager with no font open and default layout options.
    pub fn new(engine: Engine, uploader: U) -> Self {
        Self::with_options(engine, uploader, TextOptions::default())
    }

    pub fn with_options(engine: Engine, uploader: U, options: TextOptions) -> Self {
        Self {
            textures: TextureCache::new(),
            face: None,
            uploader,
            engine,
            options,
        }
    }

    /// Open a font file from disk.
    pub fn open(&mut self, path: impl AsRef<Path>) -> TextResult<()> {
        self.ensure_closed()?;
        let face = OpenTypeFace::load(path).inspect_err(|e| log::error!("font_manager: {e}"))?;
        self.install(Box::new(face));
        Ok(())
    }

    /// Open a font from bytes already in memory.
    pub fn open_bytes(&mut self, name: &str, bytes: Vec<u8>) -> TextResult<()> {
        self.ensure_closed()?;
        let face = OpenTypeFace::from_bytes(name, bytes)
            .inspect_err(|e| log::error!("font_manager: {e}"))?;
        self.install(Box::new(face));
        Ok(())
    }

    /// Open a face provided by the caller.
    pub fn open_face(&mut self, face: Box<dyn FontFace>) -> TextResult<()> {
        self.ensure_closed()?;
        self.install(face);
        Ok(())
    }

    /// Release every cached texture, then the font.
    ///
    /// Fails without side effects if no font is open.
    pub fn close(&mut self) -> TextResult<()> {
        let Some(face) = self.face.take() else {
            return Err(TextError::NoFontOpen);
        };
        let released = self.textures.len();
        self.textures.clear();
        log::debug!(
            "font_manager: closed {} ({released} textures released)",
            face.name()
        );
        drop(face);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.face.is_some()
    }

    /// Name of the open font.
    pub fn font_name(&self) -> Option<&str> {
        self.face.as_deref().map(|face| face.name())
    }

    /// Texture for `text` at `ysize` pixels, rasterizing it on first use.
    ///
    /// The cache is keyed by `text` alone: a later call with the same string
    /// and a different size returns the texture from the first call.
    /// On failure the error is logged and nothing is cached, so the string
    /// can be retried.
    pub fn get_texture(&mut self, text: &str, ysize: u32) -> TextResult<&FontTexture<U::Texture>> {
        let Self {
            textures,
            face,
            uploader,
            engine,
            options,
        } = self;

        textures.get_or_try_insert_with(text, || {
            let Some(face) = face.as_deref() else {
                log::error!("font_manager: get_texture({text:?}) with no font open");
                return Err(TextError::NoFontOpen);
            };

            let raster = {
                let mut session = engine.lock();
                rasterize_text(face, &mut session, text, ysize, options)
            }
            .inspect_err(|e| log::error!("font_manager: {e}"))?;

            let texture = FontTexture::upload(uploader, &raster)
                .inspect_err(|e| log::error!("font_manager: {e}"))?;

            log::debug!(
                "font_manager: rasterized {text:?} at {ysize}px into {}x{} ({} glyphs)",
                texture.width(),
                texture.height(),
                raster.glyph_count
            );
            Ok(texture)
        })
    }

    /// Cached texture for `text`, without rasterizing on a miss.
    pub fn cached(&self, text: &str) -> Option<&FontTexture<U::Texture>> {
        self.textures.get(text)
    }

    /// Number of cached textures.
    pub fn cached_count(&self) -> usize {
        self.textures.len()
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn ensure_closed(&self) -> TextResult<()> {
        match self.face.as_deref() {
            Some(face) => Err(TextError::FontAlreadyOpen {
                name: face.name().to_owned(),
            }),
            None => Ok(()),
        }
    }

    fn install(&mut self, face: Box<dyn FontFace>) {
        log::debug!("font_manager: opened {}", face.name());
        self.face = Some(face);
    }
}

impl<U: TextureUploader> Drop for FontManager<U> {
    fn drop(&mut self) {
        if self.is_open() {
            let _ = self.close();
        }
    }
}

#[cfg(test)]
mod tests;
