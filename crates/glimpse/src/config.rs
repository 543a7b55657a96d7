//! Configuration for intake, decoding and display.
//!
//! Configuration is plain data with sensible defaults. It can be built in code
//! or loaded from a TOML file:
//!
//! ```toml
//! [intake]
//! extensions = ["csv"]
//! mime_types = ["text/csv"]
//!
//! [decoder]
//! batch_size = 500
//!
//! [display]
//! max_rows = 200
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GlimpseError, Result};

/// Rows per decoded batch when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Rows rendered before the table is cut off.
pub const DEFAULT_MAX_DISPLAY_ROWS: usize = 200;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimpseConfig {
    /// Which files the drop surface accepts.
    pub intake: IntakeConfig,
    /// How files are decoded.
    pub decoder: DecoderConfig,
    /// How tables are rendered.
    pub display: DisplayConfig,
}

/// File intake filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Accepted file extensions, without the leading dot. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Accepted MIME types, as guessed from the file name.
    pub mime_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["csv".to_string()],
            mime_types: vec!["text/csv".to_string()],
        }
    }
}

/// Decoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Number of rows per emitted batch.
    pub batch_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum rows to render (0 = all).
    pub max_rows: usize,
    /// Whether to colorize terminal output.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_DISPLAY_ROWS,
            color: true,
        }
    }
}

impl GlimpseConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if a file is there, and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and validate a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| GlimpseError::io(path, e))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: GlimpseConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The per-user configuration file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glimpse").join("config.toml"))
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<()> {
        if self.decoder.batch_size == 0 {
            return Err(GlimpseError::Config(
                "decoder.batch_size must be at least 1".to_string(),
            ));
        }
        if self.intake.extensions.is_empty() {
            return Err(GlimpseError::Config(
                "intake.extensions must name at least one extension".to_string(),
            ));
        }
        if self.intake.mime_types.is_empty() {
            return Err(GlimpseError::Config(
                "intake.mime_types must name at least one MIME type".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlimpseConfig::default();
        assert_eq!(config.intake.extensions, vec!["csv"]);
        assert_eq!(config.intake.mime_types, vec!["text/csv"]);
        assert_eq!(config.decoder.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.display.max_rows, DEFAULT_MAX_DISPLAY_ROWS);
        assert!(config.display.color);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GlimpseConfig::from_toml("[decoder]\nbatch_size = 10\n").unwrap();
        assert_eq!(config.decoder.batch_size, 10);
        assert_eq!(config.intake, IntakeConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = GlimpseConfig::from_toml("[decoder]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, GlimpseError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = GlimpseConfig::from_toml("[display\nmax_rows = 1").unwrap_err();
        assert!(matches!(err, GlimpseError::Toml(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = GlimpseConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, GlimpseError::Io { .. }));
    }
}
