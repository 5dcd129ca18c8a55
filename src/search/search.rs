//! # Size-Targeting Search
//!
//! The attempt loop that re-encodes an image at geometrically decreasing
//! resolution until the encoded size fits a byte budget or the scale floor
//! is crossed.
//!
//! ## Algorithm
//!
//! For each scale yielded by the schedule: compute output dimensions, ask
//! the encoder for bytes at those dimensions and the fixed quality, report
//! the attempt, and stop on the first result at or under budget. A failed
//! attempt shrinks the scale multiplicatively and the loop continues; once
//! the schedule runs dry the last (smallest) result is surfaced as the
//! closest effort.
//!
//! Geometric decay trades optimality for simplicity: the scale never grows
//! back after an overshoot, so the search cannot rediscover a larger scale
//! that might also have fit. That is an accepted property, not a bug.
//!
//! ## Control Flow Guarantees
//!
//! - At least one attempt always runs, even for a degenerate schedule whose
//!   initial scale already sits at the floor.
//! - `on_progress` fires exactly once per attempt, `on_terminal` exactly
//!   once per search that passes validation, on every path including encode
//!   failure. A config rejected up front produces no events at all.
//! - Cancellation is observed only at the between-attempts checkpoint, after
//!   the budget check, so a fitting attempt wins over a simultaneous cancel.
//! - The optional inter-attempt delay is pure scheduling courtesy; it sits
//!   after the cancel checkpoint and cannot change the decay sequence or
//!   attempt count.

use std::sync::Arc;
use std::time::Duration;

use squeeze_scale::schedule::{scaled_dims, ScaleSchedule};

use crate::encode::AttemptEncoder;
use crate::error::{SqueezeError, SqueezeResult};
use crate::report::{AttemptReporter, TerminalEvent};
use crate::search::types::{
    AttemptResult, CancelHandle, ImageDescriptor, SearchConfig, SearchOutcome,
};

/// Drives the attempt loop for one search.
///
/// One instance runs one search to a single terminal outcome; independent
/// searches own independent instances and may run concurrently.
pub struct SizeTargetingSearch {
    config: SearchConfig,
    cancel: CancelHandle,
    attempt_delay: Duration,
}

impl SizeTargetingSearch {
    /// Create a search for the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: CancelHandle::new(),
            attempt_delay: Duration::ZERO,
        }
    }

    /// Set a cooperative delay between attempts.
    ///
    /// Interactive callers use a small pause (the CLI defaults to 80 ms) to
    /// keep concurrent searches responsive; others can leave this at zero.
    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }

    /// Handle the caller can use to cancel this search between attempts.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The configuration this search runs with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search to its terminal outcome.
    ///
    /// Returns `Ok` with [`SearchOutcome::Success`], [`SearchOutcome::Exhausted`]
    /// or [`SearchOutcome::Cancelled`]; a hard encode failure aborts the
    /// search immediately and surfaces as `Err`. Once attempting starts,
    /// exactly one terminal event is reported in every case; an invalid
    /// config is rejected before any attempt or event.
    pub async fn run(
        &self,
        image: &ImageDescriptor,
        encoder: &mut dyn AttemptEncoder,
        reporter: &mut dyn AttemptReporter,
    ) -> SqueezeResult<SearchOutcome> {
        self.config.validate()?;

        let mut schedule = ScaleSchedule::new(self.config.schedule);
        let mut attempt_index: u32 = 0;
        let mut last: Option<AttemptResult> = None;

        while let Some(scale) = schedule.next() {
            attempt_index += 1;
            let (width, height) = scaled_dims(image.natural_width, image.natural_height, scale);

            let bytes = match encoder
                .encode(image, width, height, self.config.quality)
                .await
            {
                Ok(bytes) => bytes,
                Err(err) => {
                    reporter.on_terminal(&TerminalEvent::Failed {
                        attempts_made: attempt_index - 1,
                        reason: err.to_string(),
                    });
                    return Err(err.with_context(format!(
                        "attempt {} at {}x{}",
                        attempt_index, width, height
                    )));
                }
            };

            let attempt = AttemptResult {
                attempt_index,
                scale,
                width,
                height,
                size: bytes.len() as u64,
                bytes: Arc::new(bytes),
            };
            reporter.on_progress(&attempt);

            if attempt.size <= self.config.target_bytes {
                reporter.on_terminal(&TerminalEvent::Success {
                    attempt: &attempt,
                    target_bytes: self.config.target_bytes,
                });
                return Ok(SearchOutcome::Success {
                    final_attempt: attempt,
                });
            }
            last = Some(attempt);

            if self.cancel.is_cancelled() {
                reporter.on_terminal(&TerminalEvent::Cancelled {
                    attempts_made: attempt_index,
                });
                return Ok(SearchOutcome::Cancelled {
                    attempts_made: attempt_index,
                });
            }

            if !self.attempt_delay.is_zero() {
                tokio::time::sleep(self.attempt_delay).await;
            }
        }

        // The schedule yields at least one value, so an empty run can only
        // mean the config slipped past validation.
        let closest_attempt = last.ok_or_else(|| {
            SqueezeError::config(
                "schedule",
                format!("{:?}", self.config.schedule),
                "schedule produced no attempts",
            )
        })?;
        reporter.on_terminal(&TerminalEvent::Exhausted {
            closest: &closest_attempt,
            attempts_made: attempt_index,
        });
        Ok(SearchOutcome::Exhausted {
            closest_attempt,
            attempts_made: attempt_index,
        })
    }
}
