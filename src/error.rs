//! # Error Handling System
//!
//! This module provides the error types for the budget-targeted compression
//! library, featuring structured error variants, classification traits, and
//! contextual metadata.
//!
//! ## Architecture
//!
//! The error system is built around a few key components:
//!
//! - **`SqueezeError`**: One variant per failure domain (config, decode,
//!   encode, I/O), each carrying an [`ErrorContext`]
//! - **Error Traits**: `HasSeverity` and `Retryable` for classification
//! - **Error Context**: Timestamp, operation, free-form context, and a
//!   recovery suggestion
//!
//! ## Error Taxonomy
//!
//! Only hard failures are errors. A search that runs out of scales without
//! meeting its budget, or one that gets cancelled, terminates with a
//! [`crate::search::SearchOutcome`] variant instead; those are defined
//! terminal states, not faults.
//!
//! ## Usage
//!
//! ```rust
//! use pixel_squeeze::error::{SqueezeError, Retryable};
//!
//! let error = SqueezeError::encode("webp_encode", "encoder rejected buffer")
//!     .with_context("attempt 3 at 1555x874");
//!
//! assert!(!error.is_retryable());
//! ```

use std::{error::Error as StdError, fmt, time::SystemTime};

/// Convenience alias used throughout the crate.
pub type SqueezeResult<T> = Result<T, SqueezeError>;

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational errors
    Info,
    /// Warnings that may indicate potential issues
    Warning,
    /// Errors that affect one search but not the batch
    Error,
    /// Fatal errors that cannot be recovered from
    Fatal,
}

/// Metadata about when and where an error occurred
#[derive(Debug)]
pub struct ErrorContext {
    /// When the error occurred
    pub timestamp: SystemTime,
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Error severity level
    pub severity: ErrorSeverity,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            timestamp: SystemTime::now(),
            operation: None,
            context: None,
            recovery_suggestion: None,
            severity: ErrorSeverity::Error,
            retryable: false,
        }
    }
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation that was being performed
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Add additional context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Set severity level
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Mark as retryable
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

/// Base error type for the compression library
#[derive(Debug)]
pub enum SqueezeError {
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Source image could not be decoded into pixel data
    Decode {
        path: String,
        reason: String,
        source: Option<image::ImageError>,
        context: ErrorContext,
    },
    /// Encode attempt failures (resize or codec rejected the buffer).
    /// Fatal for the search that hit it; never retried at another scale.
    Encode {
        operation: String,
        reason: String,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
}

impl SqueezeError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a decode error
    pub fn decode(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
            source: None,
            context: ErrorContext::new(),
        }
    }

    /// Create a decode error wrapping the image crate's error
    pub fn decode_source(path: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            reason: source.to_string(),
            source: Some(source),
            context: ErrorContext::new(),
        }
    }

    /// Create an encode error
    pub fn encode(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encode {
            operation: operation.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error bound to a path
    pub fn io_path(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path.into()),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Set severity
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    /// Mark as retryable
    pub fn retryable(mut self) -> Self {
        self.context_mut().retryable = true;
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    /// Get mutable reference to error context
    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Decode { .. } => "decode",
            Self::Encode { .. } => "encode",
            Self::Io { .. } => "io",
        }
    }
}

impl fmt::Display for SqueezeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqueezeError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            SqueezeError::Decode { path, reason, .. } => {
                write!(f, "Could not decode image '{}': {}", path, reason)
            }
            SqueezeError::Encode {
                operation, reason, ..
            } => {
                write!(f, "Encode failed during {}: {}", operation, reason)
            }
            SqueezeError::Io {
                operation,
                path,
                source,
                ..
            } => match path {
                Some(path) => write!(f, "I/O error during {} on '{}': {}", operation, path, source),
                None => write!(f, "I/O error during {}: {}", operation, source),
            },
        }
    }
}

impl StdError for SqueezeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SqueezeError::Decode { source, .. } => {
                source.as_ref().map(|e| e as &(dyn StdError + 'static))
            }
            SqueezeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SqueezeError {
    fn from(source: std::io::Error) -> Self {
        SqueezeError::io("io", source)
    }
}

impl From<image::ImageError> for SqueezeError {
    fn from(source: image::ImageError) -> Self {
        SqueezeError::decode_source("<unknown>", source)
    }
}

/// Trait for errors that expose a severity level
pub trait HasSeverity {
    fn severity(&self) -> ErrorSeverity;
}

/// Trait for errors that can be retried
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl HasSeverity for SqueezeError {
    fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }
}

impl Retryable for SqueezeError {
    fn is_retryable(&self) -> bool {
        self.context().retryable
    }
}
