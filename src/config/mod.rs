//! # Configuration Module
//!
//! This module provides configuration structures and validation for
//! budget-targeted compression runs.

pub mod config;

// Re-export commonly used types for convenience
pub use config::SqueezeConfig;
