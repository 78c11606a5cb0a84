//! Host package manager integration errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that can occur while querying the host package manager
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PlatformError {
    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    #[error("package not installed: {package}")]
    PackageNotInstalled { package: String },

    #[error("unexpected output from {command}: {output}")]
    QueryFailed { command: String, output: String },
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ProcessExecutionFailed { .. } => {
                Some("Check the [pacman] binary setting or pass --mtree with a manifest path.")
            }
            Self::PackageNotInstalled { .. } => {
                Some("Run `pacman -Q` to list installed package names.")
            }
            Self::QueryFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ProcessExecutionFailed { .. } => "platform.process_failed",
            Self::PackageNotInstalled { .. } => "platform.package_not_installed",
            Self::QueryFailed { .. } => "platform.query_failed",
        };
        Some(code)
    }
}
