//! Core domain types
//!
//! These types describe a single unlocking job from submission to its
//! terminal outcome. They are shared between the HTTP client (which moves
//! them over the wire) and the runner (which drives the poll loop).

pub mod job;
pub mod poll;
pub mod progress;
