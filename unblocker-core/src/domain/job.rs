//! Job domain types

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Reasons a [`JobRequest`] cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidJobRequest {
    #[error("target URL is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("target URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("zone cannot be empty")]
    EmptyZone,

    #[error("credential cannot be empty")]
    EmptyCredential,
}

/// A single unlocking job to submit
///
/// Immutable once constructed. All validation happens in [`JobRequest::new`],
/// so holding a `JobRequest` means the target URL parsed and the credential
/// is present. The target URL is kept exactly as given; parsing only
/// validates it.
#[derive(Clone, PartialEq, Eq)]
pub struct JobRequest {
    target_url: String,
    zone: String,
    credential: String,
}

impl JobRequest {
    /// Builds a validated job request
    ///
    /// # Arguments
    /// * `target_url` - The page the remote service should fetch
    /// * `zone` - The unlocker zone identifier
    /// * `credential` - The API key sent as a bearer token
    pub fn new(
        target_url: &str,
        zone: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, InvalidJobRequest> {
        let parsed =
            Url::parse(target_url).map_err(|e| InvalidJobRequest::InvalidUrl(e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(InvalidJobRequest::UnsupportedScheme(
                parsed.scheme().to_string(),
            ));
        }

        let zone = zone.into();
        if zone.trim().is_empty() {
            return Err(InvalidJobRequest::EmptyZone);
        }

        let credential = credential.into();
        if credential.trim().is_empty() {
            return Err(InvalidJobRequest::EmptyCredential);
        }

        Ok(Self {
            target_url: target_url.to_string(),
            zone,
            credential,
        })
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

// The credential never shows up in logs.
impl std::fmt::Debug for JobRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRequest")
            .field("target_url", &self.target_url)
            .field("zone", &self.zone)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Opaque identifier returned by the service for a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle {
    response_id: String,
}

impl JobHandle {
    pub fn new(response_id: impl Into<String>) -> Self {
        Self {
            response_id: response_id.into(),
        }
    }

    pub fn response_id(&self) -> &str {
        &self.response_id
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.response_id)
    }
}
