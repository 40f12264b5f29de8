//! Runner configuration
//!
//! Holds everything needed to run one job: credentials, the target page,
//! the API endpoint and poll tuning. The configuration is read once at
//! startup and turned into an immutable [`JobRequest`] and [`PollConfig`]
//! before any network activity happens.

use anyhow::Context;
use std::time::Duration;
use unblocker_client::DEFAULT_API_URL;
use unblocker_core::domain::job::JobRequest;
use unblocker_core::domain::poll::PollConfig;

/// Zone used when none is configured
pub const DEFAULT_ZONE: &str = "web_unlocker1";

/// Page fetched when no target URL is configured
pub const DEFAULT_TARGET_URL: &str = "https://geo.brdtest.com/welcome.txt";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// 1 minute total at the default interval
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Runner configuration
#[derive(Clone)]
pub struct Config {
    /// API key sent as bearer token
    pub api_key: String,

    /// Unlocker zone identifier
    pub zone: String,

    /// Page to unlock
    pub target_url: String,

    /// Base URL of the unlocker API (e.g., "https://api.brightdata.com")
    pub api_url: String,

    /// Delay between two polls of the result endpoint
    pub poll_interval: Duration,

    /// Number of polls before giving up
    pub max_attempts: u32,

    /// Deadline for each individual network call; defaults to three poll intervals
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new configuration with defaults
    #[allow(dead_code)]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            zone: DEFAULT_ZONE.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: None,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api key cannot be empty");
        }

        if self.zone.trim().is_empty() {
            anyhow::bail!("zone cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max attempts must be greater than 0");
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("request timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the job request described by this configuration
    pub fn job_request(&self) -> anyhow::Result<JobRequest> {
        JobRequest::new(&self.target_url, self.zone.clone(), self.api_key.clone())
            .context("Invalid job request")
    }

    /// Builds the poll configuration described by this configuration
    pub fn poll_config(&self) -> anyhow::Result<PollConfig> {
        let config = PollConfig::new(self.poll_interval, self.max_attempts)
            .context("Invalid poll configuration")?;

        match self.request_timeout {
            Some(timeout) => config
                .with_request_timeout(timeout)
                .context("Invalid poll configuration"),
            None => Ok(config),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("zone", &self.zone)
            .field("target_url", &self.target_url)
            .field("api_url", &self.api_url)
            .field("poll_interval", &self.poll_interval)
            .field("max_attempts", &self.max_attempts)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new("key".to_string());
        assert_eq!(config.zone, "web_unlocker1");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_attempts, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("key".to_string());

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty api key should fail
        config.api_key = String::new();
        assert!(config.validate().is_err());

        config.api_key = "key".to_string();

        // Invalid API URL should fail
        config.api_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());

        config.max_attempts = 0;
        assert!(config.validate().is_err());

        config.max_attempts = 1;
        config.request_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_job_request_rejects_bad_target() {
        let mut config = Config::new("key".to_string());
        config.target_url = "::not a url::".to_string();
        assert!(config.job_request().is_err());
    }

    #[test]
    fn test_poll_config_timeout_override() {
        let mut config = Config::new("key".to_string());
        assert_eq!(
            config.poll_config().unwrap().request_timeout(),
            Duration::from_secs(6)
        );

        config.request_timeout = Some(Duration::from_millis(750));
        assert_eq!(
            config.poll_config().unwrap().request_timeout(),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("super-secret".to_string());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
