//! Structured telemetry events and sinks.
//!
//! The gate runs inside CI, so telemetry never leaves the process: events are
//! either dropped or written to stderr as JSON lines for the job log.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the approval check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The complete review history was fetched.
    ReviewsFetched {
        /// Number of reviews across all pages.
        review_count: usize,
    },
    /// The check produced an outcome.
    CheckCompleted {
        /// Outcome label (`satisfied`, `approvals_needed`, `rejected`,
        /// `internal_error`).
        outcome: String,
        /// Further approvals needed; zero unless approvals are missing.
        approvals_needed: u32,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        if let Err(error) = writeln_stderr(&serialised) {
            tracing::trace!("failed to write telemetry event: {error}");
        }
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sinks for asserting on telemetry in tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Drains the recorded events.
        ///
        /// # Panics
        ///
        /// Panics if the events mutex was poisoned.
        #[expect(clippy::expect_used, reason = "test support helper")]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .expect("events mutex should be available")
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        #[expect(clippy::expect_used, reason = "test support helper")]
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .expect("events mutex should be available")
                .push(event);
        }
    }
}
