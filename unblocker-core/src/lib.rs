//! Unblocker Core
//!
//! Core types for the asynchronous web-unlocker client.
//!
//! This crate contains:
//! - Domain types: the job request, its handle, poll configuration and the
//!   classification of poll responses into outcomes
//! - DTOs: wire representations of the unlocker API requests and responses

pub mod domain;
pub mod dto;
