//! Data Transfer Objects for the unlocker API
//!
//! DTOs are the exact JSON shapes exchanged with the remote service. They are
//! kept apart from the domain types so that wire naming never leaks into the
//! poller.

pub mod job;
