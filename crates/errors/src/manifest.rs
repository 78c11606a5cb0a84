//! Manifest parsing error types
//!
//! Every variant here is fatal: the manifest is a machine-generated artifact,
//! so a structurally corrupt one cannot be trusted for any of its entries.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ManifestError {
    #[error("line {line}: malformed attribute token `{token}` (expected key=value)")]
    MalformedToken { line: usize, token: String },

    #[error("line {line}: unknown file type `{value}`")]
    UnknownType { line: usize, value: String },

    #[error("line {line}: path `{path}` does not start with ./")]
    InvalidPath { line: usize, path: String },

    #[error("line {line}: invalid value for {key}: `{value}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { line: usize, directive: String },

    #[error("failed to decompress manifest {path}: {message}")]
    Decompress { path: String, message: String },

    #[error("manifest {path} is not valid UTF-8: {message}")]
    InvalidUtf8 { path: String, message: String },
}

impl ManifestError {
    /// Line number the error was raised on, if it belongs to a specific line
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedToken { line, .. }
            | Self::UnknownType { line, .. }
            | Self::InvalidPath { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::UnknownDirective { line, .. } => Some(*line),
            Self::Decompress { .. } | Self::InvalidUtf8 { .. } => None,
        }
    }
}

impl UserFacingError for ManifestError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Decompress { .. } | Self::InvalidUtf8 { .. } => {
                Some("The manifest file looks truncated; reinstall the package to regenerate it.")
            }
            _ => Some("The manifest is corrupt; no entries were verified."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MalformedToken { .. } => "manifest.malformed_token",
            Self::UnknownType { .. } => "manifest.unknown_type",
            Self::InvalidPath { .. } => "manifest.invalid_path",
            Self::InvalidValue { .. } => "manifest.invalid_value",
            Self::UnknownDirective { .. } => "manifest.unknown_directive",
            Self::Decompress { .. } => "manifest.decompress",
            Self::InvalidUtf8 { .. } => "manifest.invalid_utf8",
        };
        Some(code)
    }
}
