//! # Search Module
//!
//! This module contains the size-targeting search core: the types describing
//! one search and the attempt loop that drives it.

pub mod search;
pub mod types;

// Re-export commonly used types for convenience
pub use search::SizeTargetingSearch;
pub use types::{AttemptResult, CancelHandle, ImageDescriptor, SearchConfig, SearchOutcome};
