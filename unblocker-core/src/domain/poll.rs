//! Poll configuration and response classification
//!
//! The result endpoint answers with one of three kinds of body: the literal
//! pending sentinel, a JSON object, or arbitrary text. [`classify_poll_body`]
//! turns a raw body into a [`PollOutcome`]; the runner decides what to do with
//! each outcome.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Body returned by the result endpoint while the job is still running
pub const PENDING_SENTINEL: &str = "Request is pending";

/// Reason used when a failed job carries no usable `error` field
pub const DEFAULT_FAILURE_REASON: &str = "Request failed";

/// Format tag attached to plain-text results
pub const TEXT_FORMAT: &str = "text";

/// Per-request timeout as a multiple of the poll interval, unless overridden
const DEFAULT_TIMEOUT_MULTIPLIER: u32 = 3;

/// Reasons a [`PollConfig`] cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPollConfig {
    #[error("poll interval must be greater than 0")]
    ZeroInterval,

    #[error("max attempts must be greater than 0")]
    ZeroAttempts,

    #[error("request timeout must be greater than 0")]
    ZeroTimeout,
}

/// Poll loop tuning
///
/// Supplied once when the poller is built and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    max_attempts: u32,
    request_timeout: Duration,
}

impl PollConfig {
    /// Creates a poll configuration
    ///
    /// The per-request timeout defaults to three poll intervals.
    pub fn new(interval: Duration, max_attempts: u32) -> Result<Self, InvalidPollConfig> {
        if interval.is_zero() {
            return Err(InvalidPollConfig::ZeroInterval);
        }
        if max_attempts == 0 {
            return Err(InvalidPollConfig::ZeroAttempts);
        }

        Ok(Self {
            interval,
            max_attempts,
            request_timeout: interval * DEFAULT_TIMEOUT_MULTIPLIER,
        })
    }

    /// Overrides the timeout applied to each individual network call
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, InvalidPollConfig> {
        if timeout.is_zero() {
            return Err(InvalidPollConfig::ZeroTimeout);
        }
        self.request_timeout = timeout;
        Ok(self)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 30,
            request_timeout: Duration::from_millis(2000) * DEFAULT_TIMEOUT_MULTIPLIER,
        }
    }
}

/// A completed job whose body was not structured data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    pub text: String,
    pub format: String,
}

impl TextResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TEXT_FORMAT.to_string(),
        }
    }
}

/// Classification of a single poll response body
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Keep polling
    Pending,
    /// The job finished and returned a JSON object
    Structured(Map<String, Value>),
    /// The job finished and returned opaque text
    Text(TextResult),
    /// The service reported that the job failed
    Failure(String),
}

impl PollOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Successful terminal value of a job
///
/// Serializes to the mapping itself for structured results and to
/// `{"text": ..., "format": "text"}` for text results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UnlockResult {
    Structured(Map<String, Value>),
    Text(TextResult),
}

impl UnlockResult {
    /// Short label for progress output
    pub fn format(&self) -> &str {
        match self {
            Self::Structured(_) => "json",
            Self::Text(text) => &text.format,
        }
    }
}

/// Classifies a raw poll body
///
/// - the exact pending sentinel is [`PollOutcome::Pending`]
/// - a JSON object with `status == "failed"` is a [`PollOutcome::Failure`]
/// - a JSON object with `status == "completed"`, or with an `html` or `text`
///   key (whatever its value), is a [`PollOutcome::Structured`] result
/// - any other JSON object is still pending
/// - anything that is not a JSON object is a finished [`PollOutcome::Text`]
pub fn classify_poll_body(body: &str) -> PollOutcome {
    if body == PENDING_SENTINEL {
        return PollOutcome::Pending;
    }

    let data = match serde_json::from_str::<Map<String, Value>>(body) {
        Ok(data) => data,
        Err(_) => return PollOutcome::Text(TextResult::new(body)),
    };

    match data.get("status").and_then(Value::as_str) {
        Some("failed") => PollOutcome::Failure(failure_reason(&data)),
        Some("completed") => PollOutcome::Structured(data),
        _ if data.contains_key("html") || data.contains_key("text") => {
            PollOutcome::Structured(data)
        }
        _ => PollOutcome::Pending,
    }
}

fn failure_reason(data: &Map<String, Value>) -> String {
    match data.get("error") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | Some(Value::String(_)) | None => DEFAULT_FAILURE_REASON.to_string(),
        Some(other) => other.to_string(),
    }
}
