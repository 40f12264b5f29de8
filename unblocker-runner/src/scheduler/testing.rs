//! Scripted unlocker API for scheduler tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use unblocker_client::{ClientError, Result, UnblockerApi};
use unblocker_core::domain::job::{JobHandle, JobRequest};

/// One scripted answer of the result endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
}

pub fn body(text: &str) -> Reply {
    Reply::Body(text.to_string())
}

/// Answers polls from a script; the last reply repeats once the script runs out
pub struct ScriptedApi {
    submit_status: Option<u16>,
    replies: Mutex<VecDeque<Reply>>,
    fetch_delay: Option<Duration>,
    submissions: Mutex<Vec<JobRequest>>,
    polls: Mutex<Vec<(String, String, Instant)>>,
}

impl ScriptedApi {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            submit_status: None,
            replies: Mutex::new(replies.into()),
            fetch_delay: None,
            submissions: Mutex::new(Vec::new()),
            polls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_submission(status: u16) -> Self {
        Self {
            submit_status: Some(status),
            ..Self::new(vec![])
        }
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.lock().unwrap().len()
    }

    /// Instants at which each poll was issued
    pub fn poll_times(&self) -> Vec<Instant> {
        self.polls.lock().unwrap().iter().map(|p| p.2).collect()
    }

    /// (response_id, credential) of each poll
    pub fn poll_params(&self) -> Vec<(String, String)> {
        self.polls
            .lock()
            .unwrap()
            .iter()
            .map(|p| (p.0.clone(), p.1.clone()))
            .collect()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().expect("no scripted replies")
        }
    }
}

#[async_trait]
impl UnblockerApi for ScriptedApi {
    async fn submit_job(&self, request: &JobRequest) -> Result<JobHandle> {
        self.submissions.lock().unwrap().push(request.clone());
        match self.submit_status {
            Some(status) => Err(ClientError::api_error(status, "rejected")),
            None => Ok(JobHandle::new("job-1")),
        }
    }

    async fn fetch_result(&self, handle: &JobHandle, credential: &str) -> Result<String> {
        self.polls.lock().unwrap().push((
            handle.response_id().to_string(),
            credential.to_string(),
            Instant::now(),
        ));

        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply() {
            Reply::Body(text) => Ok(text),
            Reply::Status(status) => Err(ClientError::api_error(status, "poll rejected")),
        }
    }
}
