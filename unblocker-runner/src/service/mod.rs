//! Service layer
//!
//! Services the scheduler depends on but that carry no polling logic of
//! their own. They are trait-based so tests can observe them.

mod progress;

// Re-export traits
pub use progress::ProgressSink;

// Re-export implementations
pub use progress::{ConsoleProgress, NoopProgress};

#[cfg(test)]
pub use progress::InMemoryProgress;
