#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for pkgverify
//!
//! One `thiserror` enum per domain, joined by the cross-crate [`Error`].
//! Attribute mismatches found during verification are not errors; they
//! only show up in the sigil.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod guard;
pub mod manifest;
pub mod platform;
pub mod storage;

// Re-export all error types at the root
pub use config::ConfigError;
pub use guard::GuardError;
pub use manifest::ManifestError;
pub use platform::PlatformError;
pub use storage::StorageError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("guard error: {0}")]
    Guard(#[from] GuardError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for pkgverify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Manifest(err) => err.user_message(),
            Error::Guard(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Platform(err) => err.user_message(),
            Error::Storage(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Manifest(err) => err.user_hint(),
            Error::Guard(err) => err.user_hint(),
            Error::Platform(err) => err.user_hint(),
            Error::Storage(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Storage(err) => err.is_retryable(),
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Manifest(err) => err.user_code(),
            Error::Guard(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
            Error::Storage(err) => err.user_code(),
        }
    }
}
