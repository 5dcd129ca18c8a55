//! # Search Types
//!
//! Value types describing one size-targeting search: the immutable source
//! image descriptor, the search configuration, per-attempt results, terminal
//! outcomes, and the cancellation handle.
//!
//! ## Ownership Model
//!
//! One search owns one `ImageDescriptor` / `SearchConfig` pair for its whole
//! lifetime. Pixel data and encoded attempt bytes are `Arc`-referenced so
//! results can be handed to reporters and callers without copying; the search
//! itself retains only the most recent [`AttemptResult`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use squeeze_scale::schedule::ScheduleConfig;

use crate::error::{SqueezeError, SqueezeResult};

/// Immutable description of one source image.
///
/// Created once per input, never mutated, owned by the caller for the
/// duration of one search.
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    /// Source width in pixels. Always >= 1.
    pub natural_width: u32,
    /// Source height in pixels. Always >= 1.
    pub natural_height: u32,
    /// Tightly-packed RGBA8 pixel data, `natural_width * natural_height * 4`
    /// bytes.
    pub pixels: Arc<Vec<u8>>,
    /// Original file name, used to derive the suggested output name.
    pub source_name: String,
}

impl ImageDescriptor {
    /// Create a descriptor, validating dimensions against the pixel buffer.
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        pixels: Arc<Vec<u8>>,
        source_name: impl Into<String>,
    ) -> SqueezeResult<Self> {
        if natural_width == 0 || natural_height == 0 {
            return Err(SqueezeError::config(
                "dimensions",
                format!("{}x{}", natural_width, natural_height),
                "image dimensions must be at least 1x1",
            ));
        }
        let expected = natural_width as usize * natural_height as usize * 4;
        if pixels.len() != expected {
            return Err(SqueezeError::config(
                "pixels",
                pixels.len().to_string(),
                format!("RGBA buffer must be exactly {} bytes", expected),
            ));
        }
        Ok(Self {
            natural_width,
            natural_height,
            pixels,
            source_name: source_name.into(),
        })
    }
}

/// Immutable configuration for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum acceptable encoded size in bytes. Positive; clamped to a sane
    /// range by the caller-facing config layer before it gets here.
    pub target_bytes: u64,
    /// Geometric scale schedule driving the attempt sequence.
    pub schedule: ScheduleConfig,
    /// Codec quality, fixed for the whole search, in (0, 1].
    pub quality: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_bytes: 500 * 1024,
            schedule: ScheduleConfig::default(),
            quality: 0.97,
        }
    }
}

impl SearchConfig {
    /// Validates the search parameters.
    pub fn validate(&self) -> SqueezeResult<()> {
        if self.target_bytes == 0 {
            return Err(SqueezeError::config(
                "target_bytes",
                "0",
                "target must be positive",
            ));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(SqueezeError::config(
                "quality",
                self.quality.to_string(),
                "quality must be in (0, 1]",
            ));
        }
        self.schedule
            .validate()
            .map_err(|reason| SqueezeError::config("schedule", "", reason))
    }
}

/// Result of one encode attempt. Immutable once produced.
#[derive(Debug, Clone)]
pub struct AttemptResult {
    /// 1-based attempt counter; strictly increases by 1 per attempt.
    pub attempt_index: u32,
    /// Scale factor used for this attempt, in (0, 1].
    pub scale: f64,
    /// Output width, `max(1, floor(natural_width * scale))`.
    pub width: u32,
    /// Output height, `max(1, floor(natural_height * scale))`.
    pub height: u32,
    /// Encoded bytes produced by this attempt.
    pub bytes: Arc<Vec<u8>>,
    /// Length of `bytes`, kept denormalized for reporting.
    pub size: u64,
}

impl AttemptResult {
    /// Scale as a whole percentage of the original, for display.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

/// Terminal value of one search.
///
/// Exactly one outcome is produced per search; a finished search cannot be
/// resumed. Hard encode failures are not an outcome variant: they surface as
/// `Err(SqueezeError::Encode { .. })` from the run.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The final attempt met the budget.
    Success {
        /// The attempt whose encoded size satisfied `size <= target_bytes`.
        final_attempt: AttemptResult,
    },
    /// The scale floor was crossed without meeting the budget.
    Exhausted {
        /// Smallest result reached; retained as the best effort.
        closest_attempt: AttemptResult,
        /// Number of attempts performed.
        attempts_made: u32,
    },
    /// The caller requested cancellation between attempts.
    Cancelled {
        /// Number of attempts completed before the cancellation was observed.
        attempts_made: u32,
    },
}

impl SearchOutcome {
    /// Number of attempts this search performed.
    pub fn attempts_made(&self) -> u32 {
        match self {
            SearchOutcome::Success { final_attempt } => final_attempt.attempt_index,
            SearchOutcome::Exhausted { attempts_made, .. } => *attempts_made,
            SearchOutcome::Cancelled { attempts_made } => *attempts_made,
        }
    }
}

/// Cloneable cancellation handle for one search.
///
/// Cancellation is observed between attempts only, never mid-encode. All
/// clones share one flag; once raised it stays raised.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a fresh, un-raised handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_validates_buffer_length() {
        let pixels = Arc::new(vec![0u8; 4 * 4 * 4]);
        assert!(ImageDescriptor::new(4, 4, pixels.clone(), "a.png").is_ok());
        assert!(ImageDescriptor::new(4, 5, pixels.clone(), "a.png").is_err());
        assert!(ImageDescriptor::new(0, 4, pixels, "a.png").is_err());
    }

    #[test]
    fn test_search_config_validation() {
        let mut config = SearchConfig::default();
        assert!(config.validate().is_ok());

        config.target_bytes = 0;
        assert!(config.validate().is_err());
        config.target_bytes = 500 * 1024;

        config.quality = 0.0;
        assert!(config.validate().is_err());
        config.quality = 1.5;
        assert!(config.validate().is_err());
        config.quality = 0.97;

        config.schedule.decay_factor = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cancel_handle_is_shared() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
    }
}
