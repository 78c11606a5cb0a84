//! Guard-specific error types for verification runs

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors emitted by the guard subsystem.
///
/// Per-entry mismatches are never errors; they are reported through the
/// sigil. Only conditions that make the rest of the run untrustworthy end up
/// here.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum GuardError {
    /// `lstat` failed for a reason other than the path being absent.
    #[error("cannot stat {path}: {message}")]
    StatFailed { path: String, message: String },

    /// A verification worker panicked or was cancelled.
    #[error("verification task failed: {message}")]
    TaskFailed { message: String },
}

impl UserFacingError for GuardError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::StatFailed { .. } => Some(
                "Inspect the path for symlink loops or I/O errors, or rerun with --stat-errors report.",
            ),
            Self::TaskFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::StatFailed { .. } => "guard.stat_failed",
            Self::TaskFailed { .. } => "guard.task_failed",
        };
        Some(code)
    }
}
