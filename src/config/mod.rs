//! Configuration structures and loading logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TextError, TextResult};
use crate::font::{ShapeOptions, parse_features};
use crate::raster::TextOptions;

/// Pixel size used when neither the config nor the caller picks one.
pub const DEFAULT_SIZE: u32 = 32;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub shaping: ShapingConfig,
    pub atlas: AtlasConfig,
}

/// Font selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file to open. `None` leaves the choice to the caller.
    pub path: Option<PathBuf>,
    /// Pixel height strings are rasterized at.
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: DEFAULT_SIZE,
        }
    }
}

/// Shaper settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    /// BCP-47 language tag, e.g. `"en"`.
    pub language: Option<String>,
    /// OpenType features to enable/disable during text shaping.
    ///
    /// Each string is a 4-character feature tag, optionally prefixed with `-`
    /// to disable. Examples: `"kern"`, `"liga"`, `"-dlig"`. Empty uses the
    /// font's defaults.
    pub features: Vec<String>,
}

/// Texture layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Pixels of padding around each glyph.
    pub padding: u32,
}

/// Return the platform-specific configuration directory for `ori_text`.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("ori_text");
        }
        PathBuf::from(".").join("ori_text")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("ori_text");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("ori_text");
        }
        PathBuf::from(".").join("ori_text")
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Load config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = config_path();
        match Self::try_load_from(&path) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(TextError::Config { message, .. }) if !path.exists() => {
                log::debug!("config: {message}, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("config: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from `path`.
    ///
    /// Unlike `load()`, this preserves the distinction between "file missing"
    /// and "parse error" so callers can report it.
    pub fn try_load_from(path: &Path) -> TextResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| TextError::Config {
            path: path.to_owned(),
            message: format!("failed to read: {e}"),
        })?;
        Self::parse(path, &data)
    }

    fn parse(path: &Path, data: &str) -> TextResult<Self> {
        toml::from_str(data).map_err(|e| TextError::Config {
            path: path.to_owned(),
            message: format!("parse error: {e}"),
        })
    }

    /// Layout and shaping options for a font manager.
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            padding: self.atlas.padding,
            shaping: ShapeOptions {
                language: self.shaping.language.clone(),
                features: parse_features(&self.shaping.features),
            },
        }
    }
}
