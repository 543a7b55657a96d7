//! The drop surface: decides which dropped or selected file gets decoded.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::source::SourceMetadata;
use crate::config::IntakeConfig;

/// Why a drop or selection was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeRejection {
    /// Nothing was dropped.
    #[error("no file was provided")]
    NoFiles,

    /// The file does not look like CSV.
    #[error("'{}' is not a CSV file (detected {mime})", .path.display())]
    UnsupportedType { path: PathBuf, mime: String },

    /// The path does not name a readable regular file.
    #[error("'{}' is not a readable file", .0.display())]
    NotAFile(PathBuf),
}

/// A file that passed intake and is ready to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedFile {
    pub path: PathBuf,
    pub source: SourceMetadata,
}

/// Accepts one CSV file per drop and tracks the drag-active state.
#[derive(Debug, Clone)]
pub struct FileIntake {
    config: IntakeConfig,
    drag_active: bool,
}

impl FileIntake {
    /// Create an intake surface with the given filter.
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            drag_active: false,
        }
    }

    /// A drag has entered the surface.
    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    /// The drag left without dropping anything.
    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Whether a drag is currently over the surface.
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Take a drop or selection. Only the first path is considered.
    pub fn accept(&mut self, paths: &[PathBuf]) -> Result<AcceptedFile, IntakeRejection> {
        self.drag_active = false;

        let Some(path) = paths.first() else {
            return Err(IntakeRejection::NoFiles);
        };
        if paths.len() > 1 {
            debug!(ignored = paths.len() - 1, "Only the first dropped file is used");
        }

        let result = self.check(path);
        match &result {
            Ok(file) => info!(file = %file.source.file, bytes = file.source.size_bytes, "Accepted file"),
            Err(rejection) => warn!(%rejection, "Rejected file"),
        }
        result
    }

    fn check(&self, path: &Path) -> Result<AcceptedFile, IntakeRejection> {
        let mime = self.check_type(path)?;

        let size_bytes = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(IntakeRejection::NotAFile(path.to_path_buf())),
        };

        Ok(AcceptedFile {
            path: path.to_path_buf(),
            source: SourceMetadata::new(path.to_path_buf(), size_bytes, mime),
        })
    }

    /// Match the extension and the guessed MIME type against the filter.
    fn check_type(&self, path: &Path) -> Result<String, IntakeRejection> {
        let guess = mime_guess::from_path(path);
        let detected = guess.first_or_octet_stream().essence_str().to_string();

        let extension_ok = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false);

        let mime = guess.iter().find(|m| {
            self.config
                .mime_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(m.essence_str()))
        });

        match mime {
            Some(mime) if extension_ok => Ok(mime.essence_str().to_string()),
            _ => Err(IntakeRejection::UnsupportedType {
                path: path.to_path_buf(),
                mime: detected,
            }),
        }
    }
}

impl Default for FileIntake {
    fn default() -> Self {
        Self::new(IntakeConfig::default())
    }
}
