//! Per-entry lines and the aggregate run report

use crate::check::Outcome;
use crate::sigil::{Check, Sigil};
use pkgv_events::{DiscrepancyKind, GuardDiscrepancy, GuardScope, GuardSummary};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Printed in place of a sigil when the recorded path does not exist
pub const MISSING_SIGIL: &str = "---------";

/// Printed in place of a sigil when the path could not be inspected
pub const STAT_ERROR_SIGIL: &str = "?????????";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Passed,
    Failed,
    Missing,
    Unreadable,
}

/// The verification result of a single entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub path: PathBuf,
    pub status: EntryStatus,
    pub sigil: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_checks: Vec<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EntryReport {
    #[must_use]
    pub fn from_outcome(path: PathBuf, outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Verified(sigil) => Self::verified(path, *sigil),
            Outcome::PathAbsent => Self {
                path,
                status: EntryStatus::Missing,
                sigil: MISSING_SIGIL.to_string(),
                failed_checks: Vec::new(),
                message: None,
            },
            Outcome::StatError(cause) => Self {
                path,
                status: EntryStatus::Unreadable,
                sigil: STAT_ERROR_SIGIL.to_string(),
                failed_checks: Vec::new(),
                message: Some(cause.to_string()),
            },
        }
    }

    fn verified(path: PathBuf, sigil: Sigil) -> Self {
        let status = if sigil.is_pass() {
            EntryStatus::Passed
        } else {
            EntryStatus::Failed
        };
        Self {
            path,
            status,
            sigil: sigil.to_string(),
            failed_checks: sigil.failed_checks(),
            message: None,
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == EntryStatus::Passed
    }

    /// The `<sigil>  <path>` output line
    #[must_use]
    pub fn line(&self) -> String {
        self.to_string()
    }

    /// Event payload for a failing entry, `None` when it passed
    #[must_use]
    pub fn discrepancy(&self) -> Option<GuardDiscrepancy> {
        let kind = match self.status {
            EntryStatus::Passed => return None,
            EntryStatus::Failed => DiscrepancyKind::Mismatch,
            EntryStatus::Missing => DiscrepancyKind::Missing,
            EntryStatus::Unreadable => DiscrepancyKind::Unreadable,
        };
        Some(GuardDiscrepancy {
            kind,
            path: self.path.display().to_string(),
            sigil: self.sigil.clone(),
            message: self.message.clone(),
        })
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.sigil, self.path.display())
    }
}

/// Result of verifying a whole manifest, entries in manifest order
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub operation_id: String,
    pub scope: GuardScope,
    pub total: usize,
    pub passed: usize,
    /// Entries with a failed check or that could not be inspected
    pub failed: usize,
    pub missing: usize,
    pub is_valid: bool,
    pub duration_ms: u64,
    pub entries: Vec<EntryReport>,
}

impl VerificationReport {
    #[must_use]
    pub fn new(
        operation_id: String,
        scope: GuardScope,
        entries: Vec<EntryReport>,
        duration_ms: u64,
    ) -> Self {
        let mut passed = 0;
        let mut failed = 0;
        let mut missing = 0;
        for entry in &entries {
            match entry.status {
                EntryStatus::Passed => passed += 1,
                EntryStatus::Failed | EntryStatus::Unreadable => failed += 1,
                EntryStatus::Missing => missing += 1,
            }
        }

        Self {
            operation_id,
            scope,
            total: entries.len(),
            passed,
            failed,
            missing,
            is_valid: failed == 0 && missing == 0,
            duration_ms,
            entries,
        }
    }

    /// Whether every entry passed every check
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Entries that did not pass, in manifest order
    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|entry| !entry.is_pass())
    }

    #[must_use]
    pub fn summary(&self) -> GuardSummary {
        GuardSummary {
            total: self.total,
            passed: self.passed,
            failed: self.failed,
            missing: self.missing,
        }
    }
}
