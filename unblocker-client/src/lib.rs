//! Unblocker HTTP Client
//!
//! A small, type-safe HTTP client for the asynchronous web-unlocker API.
//!
//! The client exposes the two calls a job needs (submit and fetch result)
//! both as inherent methods and through the [`UnblockerApi`] trait, which is
//! the seam the poller is written against.
//!
//! # Example
//!
//! ```no_run
//! use unblocker_client::UnblockerClient;
//! use unblocker_core::domain::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UnblockerClient::new("https://api.brightdata.com");
//!     let request = JobRequest::new("https://geo.brdtest.com/welcome.txt", "web_unlocker1", "key")?;
//!
//!     let handle = client.submit_job(&request).await?;
//!     let body = client.fetch_result(&handle, request.credential()).await?;
//!
//!     println!("{}: {}", handle, body);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use async_trait::async_trait;
use reqwest::Client;
use unblocker_core::domain::job::{JobHandle, JobRequest};

/// Default base URL of the unlocker API
pub const DEFAULT_API_URL: &str = "https://api.brightdata.com";

/// Operations the poller needs from the remote service
///
/// Implemented by [`UnblockerClient`] over HTTP; tests provide scripted
/// implementations.
#[async_trait]
pub trait UnblockerApi: Send + Sync {
    /// Registers a job and returns its handle
    async fn submit_job(&self, request: &JobRequest) -> Result<JobHandle>;

    /// Fetches the raw result body for a job
    ///
    /// A pending job is not an error: its body is the pending sentinel.
    async fn fetch_result(&self, handle: &JobHandle, credential: &str) -> Result<String>;
}

/// HTTP client for the unlocker API
#[derive(Debug, Clone)]
pub struct UnblockerClient {
    /// Base URL of the API (e.g., "https://api.brightdata.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl UnblockerClient {
    /// Create a new unblocker client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://api.brightdata.com")
    ///
    /// # Example
    /// ```
    /// use unblocker_client::UnblockerClient;
    ///
    /// let client = UnblockerClient::new("https://api.brightdata.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new unblocker client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use unblocker_client::UnblockerClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = UnblockerClient::with_client("https://api.brightdata.com", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and return the body as text
    ///
    /// Any non-2xx status becomes [`ClientError::ApiError`] carrying the body
    /// as message.
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl UnblockerApi for UnblockerClient {
    async fn submit_job(&self, request: &JobRequest) -> Result<JobHandle> {
        UnblockerClient::submit_job(self, request).await
    }

    async fn fetch_result(&self, handle: &JobHandle, credential: &str) -> Result<String> {
        UnblockerClient::fetch_result(self, handle, credential).await
    }
}
