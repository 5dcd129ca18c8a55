//! # Run Configuration
//!
//! Caller-facing configuration for a compression run. It serves as the
//! common interface between the CLI, embedding applications, and the search
//! core.
//!
//! ## Overview
//!
//! The configuration system is designed to be:
//! - **Validated**: runtime validation with helpful error messages
//! - **Clamped**: user-supplied targets are clamped to the supported range
//!   before any search sees them
//! - **Convertible**: one call maps a run config to the immutable
//!   per-search [`SearchConfig`]
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `inputs` | `Vec<PathBuf>` | non-empty | Source image files |
//! | `target_kb` | `u32` | 50-5000 | Byte budget per image, in KB |
//! | `quality` | `f32` | (0, 1] | Fixed codec quality for every attempt |
//! | `out_dir` | `Option<PathBuf>` | any writable dir | Artifact destination |
//! | `delay_ms` | `u64` | any | Cooperative pause between attempts |
//! | `json` | `bool` | - | Emit JSON event records instead of text |

use std::path::PathBuf;

use squeeze_scale::presets::{clamp_target_kb, MAX_TARGET_KB, MIN_TARGET_KB};

/// Configuration for one compression run over one or more input files.
#[derive(Debug, Clone)]
pub struct SqueezeConfig {
    /// Source image files. Each gets its own independent search.
    pub inputs: Vec<PathBuf>,

    /// Byte budget per image in kilobytes.
    ///
    /// Must lie in the supported inclusive range [50, 5000]. Use
    /// [`SqueezeConfig::with_clamped_target`] to coerce arbitrary user
    /// input into range first.
    pub target_kb: u32,

    /// Codec quality in (0, 1], fixed for every attempt of every search.
    ///
    /// The search varies only scale, never quality.
    pub quality: f32,

    /// Destination directory for artifacts.
    ///
    /// `None` writes next to each source file.
    pub out_dir: Option<PathBuf>,

    /// Cooperative pause between attempts in milliseconds.
    ///
    /// Pure scheduling courtesy toward concurrent searches; zero is fine
    /// and does not change any outcome.
    pub delay_ms: u64,

    /// Emit machine-readable JSON event records instead of console text.
    pub json: bool,
}

impl Default for SqueezeConfig {
    /// Creates a default configuration matching the canonical run.
    ///
    /// Default values:
    /// - `target_kb`: 500 (the classic mail-friendly budget)
    /// - `quality`: 0.97
    /// - `delay_ms`: 80 (keeps a batch of searches responsive)
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            target_kb: 500,
            quality: 0.97,
            out_dir: None,
            delay_ms: 80,
            json: false,
        }
    }
}

impl SqueezeConfig {
    /// Clamp an arbitrary user-supplied target into the supported range and
    /// set it.
    pub fn with_clamped_target(mut self, kb: u32) -> Self {
        self.target_kb = clamp_target_kb(kb);
        self
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.inputs.is_empty() {
            return Err("At least one input file is required".to_string());
        }
        if !(MIN_TARGET_KB..=MAX_TARGET_KB).contains(&self.target_kb) {
            return Err(format!(
                "Target must be between {} and {} KB",
                MIN_TARGET_KB, MAX_TARGET_KB
            ));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err("Quality must be between 0 (exclusive) and 1".to_string());
        }
        Ok(())
    }

    /// Convert to options for the batch entry point.
    pub fn to_options(&self) -> crate::SqueezeOptions {
        crate::SqueezeOptions {
            inputs: self.inputs.clone(),
            target_bytes: self.target_kb as u64 * 1024,
            quality: self.quality,
            out_dir: self.out_dir.clone(),
            delay_ms: self.delay_ms,
            json: self.json,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SqueezeConfig::default();
        assert_eq!(config.target_kb, 500);
        assert_eq!(config.quality, 0.97);
        assert_eq!(config.delay_ms, 80);
        assert!(!config.json);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SqueezeConfig {
            inputs: vec![PathBuf::from("a.png")],
            ..SqueezeConfig::default()
        };

        // Valid config should pass
        assert!(config.validate().is_ok());

        // No inputs
        config.inputs.clear();
        assert!(config.validate().is_err());
        config.inputs.push(PathBuf::from("a.png")); // Reset

        // Out-of-range target
        config.target_kb = 10;
        assert!(config.validate().is_err());
        config.target_kb = 9000;
        assert!(config.validate().is_err());
        config.target_kb = 500; // Reset

        // Invalid quality
        config.quality = 0.0;
        assert!(config.validate().is_err());
        config.quality = 1.2;
        assert!(config.validate().is_err());
        config.quality = 0.97; // Reset

        // Valid again
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamped_target() {
        let config = SqueezeConfig::default().with_clamped_target(7);
        assert_eq!(config.target_kb, 50);
        let config = SqueezeConfig::default().with_clamped_target(99999);
        assert_eq!(config.target_kb, 5000);
    }

    #[test]
    fn test_to_options() {
        let config = SqueezeConfig {
            inputs: vec![PathBuf::from("a.png")],
            target_kb: 500,
            ..SqueezeConfig::default()
        };
        let options = config.to_options();
        assert_eq!(options.target_bytes, 500 * 1024);
        assert_eq!(options.quality, 0.97);
        assert!(options.search_config().validate().is_ok());
    }
}
