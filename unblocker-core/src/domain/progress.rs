//! Progress domain types

/// A progress notification emitted while a job is driven to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub stage: ProgressStage,
}

impl ProgressEvent {
    pub fn now(stage: ProgressStage) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            stage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStage {
    Submitting,
    Submitted { response_id: String },
    Polling { attempt: u32, max_attempts: u32 },
    Completed { format: String },
}
