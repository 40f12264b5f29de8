//! Job-related API endpoints

use crate::UnblockerClient;
use crate::error::{ClientError, Result};
use tracing::debug;
use unblocker_core::domain::job::{JobHandle, JobRequest};
use unblocker_core::dto::job::{ResultQuery, SubmitJob, SubmitJobResponse};

impl UnblockerClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a new unlocking job
    ///
    /// # Arguments
    /// * `request` - The validated job request
    ///
    /// # Returns
    /// The handle identifying the job for subsequent polls
    pub async fn submit_job(&self, request: &JobRequest) -> Result<JobHandle> {
        let url = format!("{}/unblocker/req", self.base_url);
        debug!(zone = request.zone(), target = %request.target_url(), "Submitting job");

        let response = self
            .client
            .post(&url)
            .bearer_auth(request.credential())
            .json(&SubmitJob::from(request))
            .send()
            .await?;

        let body = self.handle_text_response(response).await?;
        let parsed: SubmitJobResponse = serde_json::from_str(&body).map_err(|e| {
            ClientError::ParseError(format!("Failed to parse submission response: {}", e))
        })?;

        Ok(parsed.into())
    }

    /// Fetch the current result body of a job
    ///
    /// # Arguments
    /// * `handle` - The handle returned by [`UnblockerClient::submit_job`]
    /// * `credential` - The API key used to submit the job
    ///
    /// # Returns
    /// The raw response body; interpretation is left to the caller
    pub async fn fetch_result(&self, handle: &JobHandle, credential: &str) -> Result<String> {
        let url = format!("{}/unblocker/get_result", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(credential)
            .query(&ResultQuery::from(handle))
            .send()
            .await?;

        self.handle_text_response(response).await
    }
}
