//! Error types for output writing.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Permission denied for output file: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to build workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
}

impl OutputError {
    /// Classify an I/O failure on `path`, singling out permission errors.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            OutputError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            OutputError::Write {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
