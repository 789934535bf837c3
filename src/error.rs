//! Error kinds surfaced by font opening, rasterization, and texture upload.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the text-to-texture pipeline.
#[derive(Debug, Error)]
pub enum TextError {
    /// The font file could not be read.
    #[error("can't load font resource {name}: {source}")]
    FontLoad {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The font bytes don't describe a face the rasterizer can open.
    #[error("failed to initialize font {name}")]
    FontParse { name: String },

    /// The shaping engine rejected a face the rasterizer accepted.
    #[error("failed to initialize shaping tables for font {name}")]
    ShaperPairing { name: String },

    /// `open` was called while a font is already open on this manager.
    #[error("a font is already open ({name})")]
    FontAlreadyOpen { name: String },

    /// The manager has no open font.
    #[error("no font is open")]
    NoFontOpen,

    /// Pixel size must be non-zero.
    #[error("invalid pixel size {0}")]
    InvalidSize(u32),

    /// A glyph could not be loaded, commonly because the face lacks it.
    #[error("can't load glyph {glyph_id}")]
    GlyphLoad { glyph_id: u32 },

    /// The string doesn't fit into the texture after wrapping.
    #[error("text {text:?} does not fit into a {width}x{height} texture")]
    AtlasOverflow {
        text: String,
        width: u32,
        height: u32,
    },

    /// The texture uploader failed.
    #[error("texture upload failed: {0}")]
    Upload(String),

    /// No usable GPU adapter or device.
    #[error("gpu unavailable: {0}")]
    Gpu(String),

    /// `terminate` was called while managers still hold the session.
    #[error("engine session still held by {handles} other handle(s)")]
    EngineInUse { handles: usize },

    /// Configuration file could not be read or parsed.
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result alias for pipeline operations.
pub type TextResult<T> = Result<T, TextError>;
