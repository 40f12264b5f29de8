//! Job submitter
//!
//! Registers a job with the remote service and yields its handle.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use unblocker_client::UnblockerApi;
use unblocker_core::domain::job::{JobHandle, JobRequest};

use crate::error::PollError;
use crate::scheduler::guard::guarded_call;

/// Performs the single submission request of a job
pub struct JobSubmitter {
    api: Arc<dyn UnblockerApi>,
    request_timeout: Duration,
}

impl JobSubmitter {
    pub fn new(api: Arc<dyn UnblockerApi>, request_timeout: Duration) -> Self {
        Self {
            api,
            request_timeout,
        }
    }

    /// Submits `request` exactly once
    ///
    /// Fails with [`PollError::Submission`] when the service rejects the job
    /// or does not answer in time, and with [`PollError::Cancelled`] when
    /// `cancel` fires first.
    pub async fn submit(
        &self,
        request: &JobRequest,
        cancel: &CancellationToken,
    ) -> Result<JobHandle, PollError> {
        let handle = guarded_call(
            cancel,
            self.request_timeout,
            self.api.submit_job(request),
            PollError::submission,
        )
        .await
        .inspect_err(|e| warn!(status = ?e.status(), "Job submission failed: {}", e))?;

        info!(response_id = %handle, target = %request.target_url(), "Job submitted");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ScriptedApi;

    fn request() -> JobRequest {
        JobRequest::new("https://example.com", "zone", "key").unwrap()
    }

    #[tokio::test]
    async fn test_submit_yields_handle() {
        let api = Arc::new(ScriptedApi::new(vec![]));
        let submitter = JobSubmitter::new(api.clone(), Duration::from_secs(1));

        let handle = submitter
            .submit(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(handle.response_id(), "job-1");
        assert_eq!(api.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submission_carries_status() {
        let api = Arc::new(ScriptedApi::rejecting_submission(401));
        let submitter = JobSubmitter::new(api.clone(), Duration::from_secs(1));

        let err = submitter
            .submit(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PollError::Submission {
                status: Some(401),
                ..
            }
        ));
        assert_eq!(api.submission_count(), 1);
    }
}
