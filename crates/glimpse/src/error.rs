//! Error types for the Glimpse library.

use std::path::PathBuf;
use thiserror::Error;

use crate::input::IntakeRejection;

/// Main error type for Glimpse operations.
#[derive(Debug, Error)]
pub enum GlimpseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A file was refused at intake.
    #[error("File rejected: {0}")]
    Rejected(#[from] IntakeRejection),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GlimpseError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GlimpseError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Glimpse operations.
pub type Result<T> = std::result::Result<T, GlimpseError>;
