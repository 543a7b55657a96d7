//! Metadata about an accepted file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the file currently loaded into the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// File size in bytes at the time it was accepted.
    pub size_bytes: u64,
    /// MIME type guessed from the file name.
    pub mime_type: String,
    /// When the file was accepted at intake.
    pub accepted_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has just been accepted.
    pub fn new(path: PathBuf, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            size_bytes,
            mime_type: mime_type.into(),
            accepted_at: Utc::now(),
        }
    }
}
