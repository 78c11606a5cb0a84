use crate::check::{Outcome, Verify};
use crate::report::{EntryReport, VerificationReport};
use pkgv_errors::{Error, GuardError};
use pkgv_events::{
    AppEvent, EventEmitter, EventSender, FailureContext, GuardEvent, GuardScope,
};
use pkgv_manifest::Entry;
use pkgv_types::StatErrorPolicy;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use uuid::Uuid;

/// Settings for one verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Upper bound on entries verified at the same time, at least 1
    pub max_concurrency: usize,
    pub stat_errors: StatErrorPolicy,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            stat_errors: StatErrorPolicy::Abort,
        }
    }
}

/// Verifies parsed manifest entries against the live filesystem
///
/// Entries are checked concurrently; the report always lists them in
/// manifest order.
pub struct Verifier {
    config: VerifierConfig,
    operation_id: String,
    tx: Option<EventSender>,
}

impl EventEmitter for Verifier {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(&self.operation_id)
    }
}

impl Verifier {
    #[must_use]
    pub fn new(config: VerifierConfig) -> Self {
        Self {
            config,
            operation_id: Uuid::new_v4().to_string(),
            tx: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Verify every entry and collect the results
    ///
    /// # Errors
    /// Returns `GuardError::StatFailed` when an entry cannot be inspected and
    /// the policy is [`StatErrorPolicy::Abort`], and `GuardError::TaskFailed`
    /// if a worker panics. Attribute mismatches are never errors.
    pub async fn verify_all(
        &self,
        scope: GuardScope,
        entries: Vec<Entry>,
    ) -> Result<VerificationReport, Error> {
        let start = Instant::now();
        let concurrency = self.config.max_concurrency.max(1);

        self.emit(AppEvent::Guard(GuardEvent::VerificationStarted {
            operation_id: self.operation_id.clone(),
            scope: scope.clone(),
            entries: entries.len(),
            concurrency,
        }));

        let results = match self.run(entries, concurrency).await {
            Ok(results) => results,
            Err(e) => {
                self.emit(AppEvent::Guard(GuardEvent::VerificationFailed {
                    operation_id: self.operation_id.clone(),
                    scope,
                    failure: FailureContext::from_error(&e),
                }));
                return Err(e.into());
            }
        };

        for report in &results {
            if let Some(discrepancy) = report.discrepancy() {
                self.emit(AppEvent::Guard(GuardEvent::DiscrepancyReported {
                    operation_id: self.operation_id.clone(),
                    discrepancy,
                }));
            }
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report =
            VerificationReport::new(self.operation_id.clone(), scope, results, duration_ms);

        self.emit(AppEvent::Guard(GuardEvent::VerificationCompleted {
            operation_id: self.operation_id.clone(),
            scope: report.scope.clone(),
            summary: report.summary(),
            duration_ms,
        }));

        Ok(report)
    }

    async fn run(
        &self,
        entries: Vec<Entry>,
        concurrency: usize,
    ) -> Result<Vec<EntryReport>, GuardError> {
        let total = entries.len();
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks = JoinSet::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let permit = acquire_permit(semaphore.clone()).await?;
            tasks.spawn(async move {
                let _permit = permit; // Hold permit for duration of task
                let outcome = entry.verify().await;
                (index, entry, outcome)
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            let (index, entry, outcome) = joined.map_err(|e| GuardError::TaskFailed {
                message: e.to_string(),
            })?;

            if let Outcome::StatError(cause) = &outcome {
                if self.config.stat_errors == StatErrorPolicy::Abort {
                    tasks.abort_all();
                    return Err(cause.clone());
                }
                tracing::debug!(path = %entry.path.display(), error = %cause, "cannot stat entry");
            }

            results.push((index, EntryReport::from_outcome(entry.path, &outcome)));
        }

        results.sort_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, report)| report).collect())
    }
}

async fn acquire_permit(semaphore: Arc<Semaphore>) -> Result<OwnedSemaphorePermit, GuardError> {
    semaphore
        .acquire_owned()
        .await
        .map_err(|_| GuardError::TaskFailed {
            message: "verification semaphore closed".to_string(),
        })
}
