//! # Reporting Module
//!
//! This module contains the progress/terminal event sink for searches and
//! the bundled reporter implementations.

pub mod report;

// Re-export commonly used types for convenience
pub use report::{
    format_kb, AttemptReporter, ConsoleReporter, JsonReporter, NullReporter, TerminalEvent,
};
