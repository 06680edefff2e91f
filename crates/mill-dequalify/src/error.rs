//! Error types for the dequalify pipeline

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while processing source trees and files.
///
/// None of these abort a batch run on their own: the driver logs them per
/// file (or per source tree) and moves on.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DequalifyError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source tree not found: {}", path.display())]
    SourceTree { path: PathBuf },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl DequalifyError {
    /// Create a new read error for `path`
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new write error for `path`
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new missing source tree error
    pub fn source_tree(path: impl AsRef<Path>) -> Self {
        Self::SourceTree {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new directory walk error
    pub fn walk(path: impl AsRef<Path>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Path of the file or tree the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::SourceTree { path }
            | Self::Walk { path, .. } => path,
        }
    }
}

/// Result alias used throughout the crate
pub type DequalifyResult<T> = Result<T, DequalifyError>;
