//! Job DTOs for the unlocker API

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobHandle, JobRequest};

/// Body of `POST /unblocker/req`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJob {
    pub zone: String,
    pub url: String,
}

impl From<&JobRequest> for SubmitJob {
    fn from(req: &JobRequest) -> Self {
        Self {
            zone: req.zone().to_string(),
            url: req.target_url().to_string(),
        }
    }
}

/// Successful response of `POST /unblocker/req`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub response_id: String,
}

impl From<SubmitJobResponse> for JobHandle {
    fn from(res: SubmitJobResponse) -> Self {
        JobHandle::new(res.response_id)
    }
}

/// Query string of `GET /unblocker/get_result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultQuery {
    pub response_id: String,
}

impl From<&JobHandle> for ResultQuery {
    fn from(handle: &JobHandle) -> Self {
        Self {
            response_id: handle.response_id().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submit_body_shape() {
        let req = JobRequest::new("https://geo.brdtest.com/welcome.txt", "web_unlocker1", "key")
            .unwrap();
        let body = serde_json::to_value(SubmitJob::from(&req)).unwrap();
        assert_eq!(
            body,
            json!({"zone": "web_unlocker1", "url": "https://geo.brdtest.com/welcome.txt"})
        );
    }

    #[test]
    fn test_submit_body_keeps_configured_url() {
        let req = JobRequest::new("https://Example.com?q=a b", "web_unlocker1", "key").unwrap();
        assert_eq!(SubmitJob::from(&req).url, "https://Example.com?q=a b");
    }

    #[test]
    fn test_submit_response_ignores_extra_fields() {
        let res: SubmitJobResponse =
            serde_json::from_str(r#"{"response_id":"r-1","queued":true}"#).unwrap();
        assert_eq!(JobHandle::from(res).response_id(), "r-1");
    }
}
