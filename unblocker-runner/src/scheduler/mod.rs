//! Scheduler layer for the runner
//!
//! This layer owns the lifecycle of one job: submitting it, then polling the
//! result endpoint until a terminal outcome is reached. Every network call
//! goes through the same guard, which applies the per-call timeout and
//! observes cancellation.

mod guard;
pub mod poller;
pub mod submitter;

#[cfg(test)]
mod testing;

pub use poller::JobPoller;
