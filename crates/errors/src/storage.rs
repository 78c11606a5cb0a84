//! Errors reading manifests and file contents from disk

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StorageError {
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("{path} is a directory")]
    IsDirectory { path: String },

    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

impl StorageError {
    /// Classify an `io::Error` raised while reading `path`
    #[must_use]
    pub fn from_io_with_path(err: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            ErrorKind::NotFound => Self::PathNotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            ErrorKind::IsADirectory => Self::IsDirectory { path },
            _ => Self::ReadFailed {
                path,
                message: err.to_string(),
            },
        }
    }

    /// The path the failed read was aimed at
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::PathNotFound { path }
            | Self::PermissionDenied { path }
            | Self::IsDirectory { path }
            | Self::ReadFailed { path, .. } => path,
        }
    }
}

impl UserFacingError for StorageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PathNotFound { .. } => {
                Some("Check the manifest path, or that the package is still installed.")
            }
            Self::PermissionDenied { .. } => Some("Run pkgverify as a user that can read the file."),
            Self::IsDirectory { .. } => Some("Pass the manifest file itself, not its directory."),
            Self::ReadFailed { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::PathNotFound { .. } => "storage.path_not_found",
            Self::PermissionDenied { .. } => "storage.permission_denied",
            Self::IsDirectory { .. } => "storage.is_directory",
            Self::ReadFailed { .. } => "storage.read_failed",
        };
        Some(code)
    }
}
