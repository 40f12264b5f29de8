//! Terminal errors of a job

use thiserror::Error;

/// Every way a job can end without a result
///
/// None of these are retried; the pending/wait cycle is not an error.
#[derive(Debug, Error)]
pub enum PollError {
    /// The service rejected the job, or submission never got an answer
    #[error("Job submission failed: {message}")]
    Submission {
        /// HTTP status code, if the service responded
        status: Option<u16>,
        message: String,
    },

    /// A poll call failed at the transport level
    #[error("Polling failed: {message}")]
    PollTransport {
        /// HTTP status code, if the service responded
        status: Option<u16>,
        message: String,
    },

    /// The service reported that the job failed
    #[error("{0}")]
    JobFailed(String),

    /// Every attempt saw a pending job
    #[error("Maximum polling attempts reached ({attempts})")]
    Timeout { attempts: u32 },

    #[error("Job cancelled")]
    Cancelled,
}

impl PollError {
    pub fn submission(status: Option<u16>, message: String) -> Self {
        Self::Submission { status, message }
    }

    pub fn poll_transport(status: Option<u16>, message: String) -> Self {
        Self::PollTransport { status, message }
    }

    /// HTTP status code behind a transport-level failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Submission { status, .. } | Self::PollTransport { status, .. } => *status,
            _ => None,
        }
    }
}
