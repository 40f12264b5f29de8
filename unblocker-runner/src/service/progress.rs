//! Progress reporting service
//!
//! The poller announces each step of a job through a [`ProgressSink`]. The
//! console implementation prints the familiar one-line status messages; the
//! no-op implementation is used with `--quiet`.

use colored::*;
use unblocker_core::domain::poll::TEXT_FORMAT;
use unblocker_core::domain::progress::{ProgressEvent, ProgressStage};

/// Receiver of progress events
pub trait ProgressSink: Send + Sync {
    /// Records a single progress event
    fn report(&self, event: ProgressEvent);
}

/// Prints progress to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    /// Full console line: time of the event, then the stage message
    fn line(event: &ProgressEvent) -> String {
        format!(
            "{} {}",
            event.timestamp.format("%H:%M:%S").to_string().dimmed(),
            Self::render(&event.stage)
        )
    }

    fn render(stage: &ProgressStage) -> String {
        match stage {
            ProgressStage::Submitting => format!("🔄 {}", "Starting request...".cyan()),
            ProgressStage::Submitted { .. } => format!("✅ {}", "Request initiated".green()),
            ProgressStage::Polling {
                attempt,
                max_attempts,
            } => format!("⏳ Polling attempt {}/{}...", attempt, max_attempts)
                .dimmed()
                .to_string(),
            ProgressStage::Completed { format } if format == TEXT_FORMAT => {
                format!("✅ {}", "Request completed with text response!".green().bold())
            }
            ProgressStage::Completed { .. } => {
                format!("✅ {}", "Request completed!".green().bold())
            }
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        println!("{}", Self::line(&event));
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// In-memory implementation of ProgressSink
///
/// Uses Arc<Mutex<Vec<ProgressEvent>>> so clones share the same buffer.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct InMemoryProgress {
    events: std::sync::Arc<std::sync::Mutex<Vec<ProgressEvent>>>,
}

#[cfg(test)]
impl InMemoryProgress {
    pub fn stages(&self) -> Vec<ProgressStage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.stage.clone())
            .collect()
    }
}

#[cfg(test)]
impl ProgressSink for InMemoryProgress {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_polling_attempt() {
        colored::control::set_override(false);
        let line = ConsoleProgress::render(&ProgressStage::Polling {
            attempt: 3,
            max_attempts: 30,
        });
        assert_eq!(line, "⏳ Polling attempt 3/30...");
    }

    #[test]
    fn test_render_completion_by_format() {
        colored::control::set_override(false);
        let text = ConsoleProgress::render(&ProgressStage::Completed {
            format: "text".to_string(),
        });
        let json = ConsoleProgress::render(&ProgressStage::Completed {
            format: "json".to_string(),
        });
        assert_eq!(text, "✅ Request completed with text response!");
        assert_eq!(json, "✅ Request completed!");
    }

    #[test]
    fn test_line_starts_with_event_time() {
        colored::control::set_override(false);
        let event = ProgressEvent::now(ProgressStage::Submitting);
        let expected = format!(
            "{} 🔄 Starting request...",
            event.timestamp.format("%H:%M:%S")
        );
        assert_eq!(ConsoleProgress::line(&event), expected);
    }

    #[test]
    fn test_in_memory_progress_records_in_order() {
        let sink = InMemoryProgress::default();
        sink.report(ProgressEvent::now(ProgressStage::Submitting));
        sink.report(ProgressEvent::now(ProgressStage::Submitted {
            response_id: "r-1".to_string(),
        }));
        assert_eq!(
            sink.stages(),
            vec![
                ProgressStage::Submitting,
                ProgressStage::Submitted {
                    response_id: "r-1".to_string()
                },
            ]
        );
    }
}
