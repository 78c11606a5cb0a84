//! Host package manager events

use serde::{Deserialize, Serialize};

/// Events raised while talking to the host package manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    /// Process execution started
    ProcessExecutionStarted {
        /// Command being executed
        command: String,
        args: Vec<String>,
    },

    /// Process execution completed
    ProcessExecutionCompleted {
        command: String,
        /// Exit code from the process, `None` when killed by a signal
        exit_code: Option<i32>,
        duration_ms: u64,
    },

    /// Process could not be started or waited on
    ProcessExecutionFailed {
        command: String,
        error_message: String,
        duration_ms: u64,
    },

    /// An installed package was resolved to its manifest
    PackageResolved {
        package: String,
        version: String,
        manifest: String,
    },
}
