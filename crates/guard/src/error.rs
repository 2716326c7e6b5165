//! Errors produced by the sandbox.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from root establishment and path validation.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The path, its real path, or its parent's real path is outside every root.
    #[error(
        "access denied - path outside allowed directories: {} not in {}",
        .path.display(),
        join(.roots)
    )]
    AccessDenied { path: PathBuf, roots: Vec<PathBuf> },
    /// The target does not exist and neither does its parent directory.
    #[error("parent directory does not exist: {}", .0.display())]
    ParentNotFound(PathBuf),
    /// A configured root could not be stat'ed or is not a directory.
    #[error("invalid allowed directory {}: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },
    /// No roots were configured.
    #[error("at least one allowed directory is required")]
    NoRoots,
    /// The path contains a null byte.
    #[error("path contains null byte")]
    NullByte,
    /// A resource URI that is not a `file://` URI.
    #[error("unsupported resource URI: {0}")]
    UnsupportedUri(String),
}

fn join(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl GuardError {
    pub(crate) fn invalid_root(path: &Path, reason: impl ToString) -> Self {
        Self::InvalidRoot {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
