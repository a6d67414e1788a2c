// src/batch/coordinator.rs
// =============================================================================
// Runs a whole batch of link checks concurrently.
//
// How it works:
// 1. Every URL of every request becomes its own tokio task
// 2. A semaphore caps how many of those tasks talk to the network at once
//    (a global ceiling across the batch, not per request)
// 3. Results come back in completion order and are written into a slot
//    addressed by (request index, url index)
// 4. If a batch deadline is set and elapses, the remaining tasks are aborted
//    and their slots are filled with Timeout failures
// 5. The slots are aggregated per request, in input order
//
// A task that panics only loses its own URL: tokio catches the panic at the
// task boundary and we count that URL as unreachable.
//
// Rust concepts:
// - tokio::spawn: runs each check as an independent task
// - Semaphore + OwnedSemaphorePermit: the permit is released when dropped
// - FuturesUnordered: yields whichever check finishes first
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info, log, warn, Level};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinError};
use tokio::time::Instant;

use super::assemble::assemble;
use crate::checker::{FailureKind, HttpTransport, LinkCheckOutcome, ResourceLinkChecker, Transport};
use crate::config::CheckConfig;
use crate::error::{ConfigError, InitError};
use crate::model::{FieldName, LinkCheckRequest, Report};

/// Checks batches of link-check requests with bounded parallelism.
pub struct BatchLinkCheckCoordinator {
    checker: Arc<ResourceLinkChecker>,
    max_concurrent_checks: usize,
    batch_deadline: Option<Duration>,
}

// Aborts every spawned check when the batch stops waiting for them,
// including when the run_batch future itself is dropped
#[derive(Default)]
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

impl BatchLinkCheckCoordinator {
    /// Creates a coordinator that checks links over real HTTP.
    pub fn new(config: &CheckConfig) -> Result<Self, InitError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport))?)
    }

    /// Creates a coordinator on top of any transport.
    pub fn with_transport(
        config: &CheckConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            checker: Arc::new(ResourceLinkChecker::new(transport, config.max_redirects)),
            max_concurrent_checks: config.max_concurrent_checks,
            batch_deadline: config.batch_deadline,
        })
    }

    /// Checks every URL of every request and reports one status per request,
    /// in the order of `requests`.
    ///
    /// Returns once all checks are done, or when the batch deadline elapses.
    pub async fn run_batch(&self, requests: &[LinkCheckRequest]) -> Report {
        let total_urls: usize = requests.iter().map(|r| r.urls().len()).sum();
        info!(
            "Checking {} URL(s) from {} request(s), at most {} at a time",
            total_urls,
            requests.len(),
            self.max_concurrent_checks
        );

        let started = Instant::now();
        let deadline = self.batch_deadline.map(|limit| started + limit);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_checks));
        let mut abort_guard = AbortOnDrop::default();
        let mut pending = FuturesUnordered::new();

        for (request_index, request) in requests.iter().enumerate() {
            let field = request.field_name();

            for (url_index, url) in request.urls().iter().enumerate() {
                let checker = Arc::clone(&self.checker);
                let semaphore = Arc::clone(&semaphore);
                let task_url = url.clone();

                let handle = tokio::spawn(async move {
                    // Never closed, so this only waits for a free slot
                    let _permit = semaphore.acquire_owned().await;
                    checker.check(&task_url).await
                });
                abort_guard.0.push(handle.abort_handle());

                let url = url.clone();
                pending.push(async move {
                    let outcome = match handle.await {
                        Ok(outcome) => outcome,
                        Err(join_error) => isolated_failure(field, url, join_error),
                    };
                    (request_index, url_index, outcome)
                });
            }
        }

        let mut slots: Vec<Vec<Option<LinkCheckOutcome>>> = requests
            .iter()
            .map(|request| vec![None; request.urls().len()])
            .collect();

        loop {
            let next = match deadline {
                Some(deadline) => {
                    let waited = tokio::time::timeout_at(deadline, pending.next()).await;
                    match waited {
                        Ok(next) => next,
                        Err(_) => {
                            warn!(
                                "Batch deadline of {:?} elapsed with {} check(s) in flight, counting them as timed out",
                                self.batch_deadline.unwrap_or_default(),
                                pending.len()
                            );
                            break;
                        }
                    }
                }
                None => pending.next().await,
            };

            let Some((request_index, url_index, outcome)) = next else {
                break;
            };
            log_outcome(requests[request_index].field_name(), &outcome);
            slots[request_index][url_index] = Some(outcome);
        }

        drop(pending);
        drop(abort_guard);

        let outcomes = fill_unfinished(requests, slots);
        let report = assemble(requests, &outcomes);

        let succeeded: usize = report.iter().map(|s| s.succeeded_count).sum();
        info!(
            "Batch finished in {:.2}s: {} succeeded, {} failed",
            started.elapsed().as_secs_f64(),
            succeeded,
            total_urls - succeeded
        );

        report
    }
}

// A check that ended without producing an outcome
fn isolated_failure(field: FieldName, url: String, join_error: JoinError) -> LinkCheckOutcome {
    if join_error.is_panic() {
        error!(
            "Check of {} ({}) panicked, counting it as unreachable: {}",
            url, field, join_error
        );
        LinkCheckOutcome::failure(url, FailureKind::Unreachable, "check panicked")
    } else {
        warn!("Check of {} ({}) was cancelled", url, field);
        LinkCheckOutcome::failure(url, FailureKind::Unreachable, "check cancelled")
    }
}

// Slots still empty belong to checks cut off by the batch deadline
fn fill_unfinished(
    requests: &[LinkCheckRequest],
    slots: Vec<Vec<Option<LinkCheckOutcome>>>,
) -> Vec<Vec<LinkCheckOutcome>> {
    requests
        .iter()
        .zip(slots)
        .map(|(request, request_slots)| {
            request
                .urls()
                .iter()
                .zip(request_slots)
                .map(|(url, slot)| {
                    slot.unwrap_or_else(|| {
                        LinkCheckOutcome::failure(
                            url.clone(),
                            FailureKind::Timeout,
                            "batch deadline elapsed",
                        )
                    })
                })
                .collect()
        })
        .collect()
}

fn log_outcome(field: FieldName, outcome: &LinkCheckOutcome) {
    let message = outcome.message.as_deref().unwrap_or("");
    let level = outcome_log_level(outcome);
    match outcome.failure {
        None => log!(level, "[{}] {} ok ({})", field, outcome.url, message),
        Some(_) if outcome.unexpected => log!(
            level,
            "[{}] {} failed with an unexpected error, counting it as unreachable: {}",
            field,
            outcome.url,
            message
        ),
        Some(kind) => log!(level, "[{}] {} failed: {} ({})", field, outcome.url, kind, message),
    }
}

// Ordinary results stay at debug; unexpected failures may hide a bug
fn outcome_log_level(outcome: &LinkCheckOutcome) -> Level {
    if outcome.unexpected {
        Level::Warn
    } else {
        Level::Debug
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not buffer_unordered(N)?
//    - buffer_unordered also caps concurrency, but a panic inside one of its
//      futures unwinds through the whole stream
//    - Spawned tasks contain the panic; handle.await hands back a JoinError
//
// 2. What does acquire_owned() give us?
//    - An OwnedSemaphorePermit that lives inside the task
//    - When the task ends (normally, by panic, or by abort), the permit is
//      dropped and the next waiting check can start
//
// 3. What happens to tasks when we stop waiting?
//    - Dropping a JoinHandle does NOT stop the task
//    - That is what AbortOnDrop is for: it aborts every task it knows about,
//      which drops their in-flight requests and closes the connections
// -----------------------------------------------------------------------------
