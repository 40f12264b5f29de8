//! Job poller
//!
//! Drives one job from submission to a terminal outcome. Each attempt fetches
//! the result body once and classifies it:
//! - pending (sentinel or an unrecognized JSON object): wait one interval and
//!   try again, or give up once the attempt budget is spent
//! - structured or text result: return it
//! - explicit failure: raise it
//!
//! Transport failures are never retried.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use unblocker_client::UnblockerApi;
use unblocker_core::domain::job::{JobHandle, JobRequest};
use unblocker_core::domain::poll::{PollConfig, PollOutcome, UnlockResult, classify_poll_body};
use unblocker_core::domain::progress::{ProgressEvent, ProgressStage};

use crate::error::PollError;
use crate::scheduler::guard::{cancellable_sleep, guarded_call};
use crate::scheduler::submitter::JobSubmitter;
use crate::service::ProgressSink;

/// Poller owning the submit, poll and resolve lifecycle of a single job
pub struct JobPoller {
    api: Arc<dyn UnblockerApi>,
    config: PollConfig,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
}

impl JobPoller {
    /// Creates a new job poller
    ///
    /// Cancelling `cancel` aborts the job at the next network call or wait.
    pub fn new(
        api: Arc<dyn UnblockerApi>,
        config: PollConfig,
        progress: Arc<dyn ProgressSink>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            config,
            progress,
            cancel,
        }
    }

    /// Submits `request` and polls until the job reaches a terminal outcome
    pub async fn run(&self, request: &JobRequest) -> Result<UnlockResult, PollError> {
        self.report(ProgressStage::Submitting);

        let handle = JobSubmitter::new(Arc::clone(&self.api), self.config.request_timeout())
            .submit(request, &self.cancel)
            .await?;

        self.report(ProgressStage::Submitted {
            response_id: handle.response_id().to_string(),
        });

        let result = self.poll(&handle, request.credential()).await?;

        self.report(ProgressStage::Completed {
            format: result.format().to_string(),
        });

        Ok(result)
    }

    /// Polls an already submitted job
    pub async fn poll(
        &self,
        handle: &JobHandle,
        credential: &str,
    ) -> Result<UnlockResult, PollError> {
        let max_attempts = self.config.max_attempts();

        for attempt in 1..=max_attempts {
            self.report(ProgressStage::Polling {
                attempt,
                max_attempts,
            });

            let body = guarded_call(
                &self.cancel,
                self.config.request_timeout(),
                self.api.fetch_result(handle, credential),
                PollError::poll_transport,
            )
            .await
            .inspect_err(|e| {
                warn!(response_id = %handle, attempt, status = ?e.status(), "Poll failed: {}", e)
            })?;

            match classify_poll_body(&body) {
                PollOutcome::Pending => {
                    debug!(response_id = %handle, attempt, "Job still pending");
                    cancellable_sleep(&self.cancel, self.config.interval()).await?;
                }
                PollOutcome::Structured(data) => {
                    info!(response_id = %handle, attempt, "Job completed");
                    return Ok(UnlockResult::Structured(data));
                }
                PollOutcome::Text(text) => {
                    info!(response_id = %handle, attempt, "Job completed with text response");
                    return Ok(UnlockResult::Text(text));
                }
                PollOutcome::Failure(reason) => {
                    warn!(response_id = %handle, attempt, "Job failed: {}", reason);
                    return Err(PollError::JobFailed(reason));
                }
            }
        }

        warn!(response_id = %handle, max_attempts, "Maximum polling attempts reached");
        Err(PollError::Timeout {
            attempts: max_attempts,
        })
    }

    fn report(&self, stage: ProgressStage) {
        self.progress.report(ProgressEvent::now(stage));
    }
}
