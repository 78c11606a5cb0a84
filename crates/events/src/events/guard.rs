use serde::{Deserialize, Serialize};

/// What a verification run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardScope {
    /// An installed package resolved through the host package manager.
    Package { name: String, version: String },
    /// A manifest file named directly.
    Manifest { path: String },
}

impl GuardScope {
    /// Short label used in log lines.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Package { name, version } => format!("{name} {version}"),
            Self::Manifest { path } => path.clone(),
        }
    }
}

/// Aggregate counts at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub missing: usize,
}

/// How an entry failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// One or more attribute checks failed.
    Mismatch,
    /// The recorded path does not exist.
    Missing,
    /// The path could not be inspected.
    Unreadable,
}

/// A failing entry surfaced to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardDiscrepancy {
    pub kind: DiscrepancyKind,
    pub path: String,
    pub sigil: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Guard events for installed-file verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuardEvent {
    /// Verification of a parsed manifest started.
    VerificationStarted {
        operation_id: String,
        scope: GuardScope,
        entries: usize,
        concurrency: usize,
    },

    /// A single entry did not verify.
    DiscrepancyReported {
        operation_id: String,
        discrepancy: GuardDiscrepancy,
    },

    /// Verification finished, whether or not entries failed.
    VerificationCompleted {
        operation_id: String,
        scope: GuardScope,
        summary: GuardSummary,
        duration_ms: u64,
    },

    /// Verification aborted before completion.
    VerificationFailed {
        operation_id: String,
        scope: GuardScope,
        failure: super::FailureContext,
    },
}
