//! Structured logging integration for events
//!
//! Library crates report progress as [`EventMessage`]s. This module turns each
//! one into a `tracing` record with the event metadata as structured fields.

use pkgv_events::{AppEvent, EventMessage, GeneralEvent, GuardEvent, PlatformEvent};
use tracing::{debug, error, info, trace, warn};

/// Log an event at its own level with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;
    let level = meta.tracing_level();

    match event {
        AppEvent::Guard(guard_event) => match guard_event {
            GuardEvent::VerificationStarted {
                operation_id,
                scope,
                entries,
                concurrency,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    scope = %scope.label(),
                    entries = entries,
                    concurrency = concurrency,
                    "Verification started"
                );
            }
            GuardEvent::DiscrepancyReported {
                operation_id,
                discrepancy,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    kind = ?discrepancy.kind,
                    path = %discrepancy.path,
                    sigil = %discrepancy.sigil,
                    message = ?discrepancy.message,
                    "Entry did not verify"
                );
            }
            GuardEvent::VerificationCompleted {
                operation_id,
                scope,
                summary,
                duration_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    scope = %scope.label(),
                    total = summary.total,
                    passed = summary.passed,
                    failed = summary.failed,
                    missing = summary.missing,
                    duration_ms = duration_ms,
                    "Verification completed"
                );
            }
            GuardEvent::VerificationFailed {
                operation_id,
                scope,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation_id = %operation_id,
                    scope = %scope.label(),
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Verification failed"
                );
            }
        },

        AppEvent::Platform(platform_event) => match platform_event {
            PlatformEvent::ProcessExecutionStarted { command, args } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    command = %command,
                    args = ?args,
                    "Process started"
                );
            }
            PlatformEvent::ProcessExecutionCompleted {
                command,
                exit_code,
                duration_ms,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    command = %command,
                    exit_code = ?exit_code,
                    duration_ms = duration_ms,
                    "Process completed"
                );
            }
            PlatformEvent::ProcessExecutionFailed {
                command,
                error_message,
                duration_ms,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    command = %command,
                    error = %error_message,
                    duration_ms = duration_ms,
                    "Process failed to run"
                );
            }
            PlatformEvent::PackageResolved {
                package,
                version,
                manifest,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    package = %package,
                    version = %version,
                    manifest = %manifest,
                    "Package resolved"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    message = %message,
                    "Warning"
                );
            }
            GeneralEvent::Error { message } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    message = %message,
                    "Error"
                );
            }
            GeneralEvent::ManifestLoaded { path, entries } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    path = %path,
                    entries = entries,
                    "Manifest loaded"
                );
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    message = %message,
                    context = ?context,
                    "Debug log"
                );
            }
            _ => match level {
                tracing::Level::ERROR => {
                    error!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
                }
                tracing::Level::WARN => {
                    warn!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
                }
                tracing::Level::INFO => {
                    info!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
                }
                tracing::Level::DEBUG => {
                    debug!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
                }
                tracing::Level::TRACE => {
                    trace!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?general_event, "General event");
                }
            },
        },
    }
}
