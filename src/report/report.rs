//! # Attempt Reporting
//!
//! Passive sink for search progress. The search pushes one structured event
//! per attempt and one terminal event per search; reporters render, log, or
//! ignore them. Reporters own no control flow.
//!
//! ## Contract
//!
//! - `on_progress` fires exactly once per attempt, including the attempt
//!   that meets the budget, always before the terminal event.
//! - `on_terminal` fires exactly once per search.
//! - Both methods are infallible by signature: a reporter cannot abort the
//!   search. Reporters that write to fallible sinks drop their own write
//!   errors at this boundary.
//!
//! ## Implementations
//!
//! - [`ConsoleReporter`]: human-readable lines on stdout, one per event,
//!   prefixed with the source name so concurrent searches stay legible.
//! - [`JsonReporter`]: one JSON object per line to any `io::Write`, for
//!   machine consumers.
//! - [`NullReporter`]: discards everything.

use std::io::Write;

use crate::search::types::AttemptResult;

/// Terminal event emitted exactly once at the end of a search.
#[derive(Debug)]
pub enum TerminalEvent<'a> {
    /// The final attempt met the budget.
    Success {
        attempt: &'a AttemptResult,
        target_bytes: u64,
    },
    /// The scale floor was crossed; `closest` is the smallest result reached.
    Exhausted {
        closest: &'a AttemptResult,
        attempts_made: u32,
    },
    /// The caller cancelled the search between attempts.
    Cancelled { attempts_made: u32 },
    /// A hard encode failure aborted the search.
    Failed { attempts_made: u32, reason: String },
}

/// Sink for per-attempt progress and the terminal event of one search.
pub trait AttemptReporter: Send {
    /// Called once per attempt, before any terminal event.
    fn on_progress(&mut self, attempt: &AttemptResult);
    /// Called exactly once when the search reaches a terminal state.
    fn on_terminal(&mut self, event: &TerminalEvent<'_>);
}

/// Format a byte count as kilobytes with one decimal, e.g. `412.3 KB`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Human-readable reporter writing one line per event.
///
/// Write errors are swallowed like [`JsonReporter`]'s: a closed stdout (the
/// usual broken pipe when piped into `head`) must not panic through the
/// search producing the events.
pub struct ConsoleReporter<W: Write + Send = std::io::Stdout> {
    label: String,
    writer: W,
}

impl ConsoleReporter {
    /// Create a reporter writing to stdout, lines prefixed with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_writer(label, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Create a reporter writing to `writer`, lines prefixed with `label`.
    pub fn with_writer(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            writer,
        }
    }

    /// Consume the reporter and hand back its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> AttemptReporter for ConsoleReporter<W> {
    fn on_progress(&mut self, attempt: &AttemptResult) {
        let _ = writeln!(
            self.writer,
            "[{}] Attempt {}: {}x{} at {}% of original, {}",
            self.label,
            attempt.attempt_index,
            attempt.width,
            attempt.height,
            attempt.scale_percent(),
            format_kb(attempt.size),
        );
    }

    fn on_terminal(&mut self, event: &TerminalEvent<'_>) {
        let _ = match event {
            TerminalEvent::Success {
                attempt,
                target_bytes,
            } => writeln!(
                self.writer,
                "[{}] Finished in {} attempts. Final size: {} (target {})",
                self.label,
                attempt.attempt_index,
                format_kb(attempt.size),
                format_kb(*target_bytes),
            ),
            TerminalEvent::Exhausted {
                closest,
                attempts_made,
            } => writeln!(
                self.writer,
                "[{}] Stopped after {} attempts. Closest size: {}",
                self.label,
                attempts_made,
                format_kb(closest.size),
            ),
            TerminalEvent::Cancelled { attempts_made } => writeln!(
                self.writer,
                "[{}] Cancelled after {} attempts.",
                self.label, attempts_made
            ),
            TerminalEvent::Failed {
                attempts_made,
                reason,
            } => writeln!(
                self.writer,
                "[{}] Failed after {} attempts: {}",
                self.label, attempts_made, reason
            ),
        };
    }
}

/// Machine-readable reporter writing one JSON object per line.
///
/// Write errors are swallowed: a broken pipe on the event stream must not
/// abort the search producing the events.
pub struct JsonReporter<W: Write + Send> {
    label: String,
    writer: W,
}

impl<W: Write + Send> JsonReporter<W> {
    /// Create a reporter tagging every record with `label`.
    pub fn new(label: impl Into<String>, writer: W) -> Self {
        Self {
            label: label.into(),
            writer,
        }
    }

    /// Consume the reporter and hand back its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, value: serde_json::Value) {
        let _ = serde_json::to_writer(&mut self.writer, &value);
        let _ = self.writer.write_all(b"\n");
    }
}

impl<W: Write + Send> AttemptReporter for JsonReporter<W> {
    fn on_progress(&mut self, attempt: &AttemptResult) {
        self.emit(serde_json::json!({
            "event": "attempt",
            "file": self.label,
            "attempt": attempt.attempt_index,
            "scale_percent": attempt.scale_percent(),
            "width": attempt.width,
            "height": attempt.height,
            "size_bytes": attempt.size,
        }));
    }

    fn on_terminal(&mut self, event: &TerminalEvent<'_>) {
        let value = match event {
            TerminalEvent::Success {
                attempt,
                target_bytes,
            } => serde_json::json!({
                "event": "success",
                "file": self.label,
                "attempts": attempt.attempt_index,
                "size_bytes": attempt.size,
                "target_bytes": target_bytes,
            }),
            TerminalEvent::Exhausted {
                closest,
                attempts_made,
            } => serde_json::json!({
                "event": "exhausted",
                "file": self.label,
                "attempts": attempts_made,
                "closest_bytes": closest.size,
            }),
            TerminalEvent::Cancelled { attempts_made } => serde_json::json!({
                "event": "cancelled",
                "file": self.label,
                "attempts": attempts_made,
            }),
            TerminalEvent::Failed {
                attempts_made,
                reason,
            } => serde_json::json!({
                "event": "failed",
                "file": self.label,
                "attempts": attempts_made,
                "reason": reason,
            }),
        };
        self.emit(value);
    }
}

/// Reporter that discards every event.
#[derive(Debug, Default)]
pub struct NullReporter;

impl AttemptReporter for NullReporter {
    fn on_progress(&mut self, _attempt: &AttemptResult) {}
    fn on_terminal(&mut self, _event: &TerminalEvent<'_>) {}
}
