// SPDX-License-Identifier: MIT
//! # Scale Schedules and Dimension Computation
//!
//! This module provides the core schedule logic for budget-targeted
//! re-encoding: a geometric decay sequence of scale factors and the mapping
//! from a scale factor to concrete output pixel dimensions.
//!
//! ## Design Philosophy
//!
//! The schedule is a plain `Iterator<Item = f64>` so the consuming search
//! loop owns all control flow; the schedule only answers "which scale comes
//! next, if any". Geometric decay (multiplicative shrink) was chosen over a
//! binary search: every step is strictly smaller than the last, so
//! termination is guaranteed without bracketing or backtracking. The policy
//! never revisits a larger scale after overshooting a budget.
//!
//! ## Floor Semantics
//!
//! The floor is exclusive and checked at continuation time, not before the
//! first value: even a degenerate config with `initial_scale <= min_scale`
//! yields its initial scale exactly once. This guarantees the consuming loop
//! always performs at least one attempt.

/// Parameters of a geometric scale schedule.
///
/// The defaults reproduce the canonical budget search: start at full size,
/// shrink both dimensions by 10% per step, stop once the factor would fall
/// to 5% of the original or below.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// Scale factor for the first step, in (0, 1].
    pub initial_scale: f64,
    /// Multiplicative shrink applied after each step, in (0, 1).
    pub decay_factor: f64,
    /// Exclusive lower bound; the schedule stops once the next factor would
    /// be `<= min_scale`.
    pub min_scale: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            decay_factor: 0.9,
            min_scale: 0.05,
        }
    }
}

impl ScheduleConfig {
    /// Validates the schedule parameters.
    ///
    /// Returns a human-readable message naming the offending field, in the
    /// same spirit as the config validators in the root crate.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_scale > 0.0 && self.initial_scale <= 1.0) {
            return Err(format!(
                "initial_scale must be in (0, 1], got {}",
                self.initial_scale
            ));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(format!(
                "decay_factor must be in (0, 1), got {}",
                self.decay_factor
            ));
        }
        if !(self.min_scale > 0.0) {
            return Err(format!("min_scale must be positive, got {}", self.min_scale));
        }
        Ok(())
    }
}

/// Iterator over the scale factors of one search.
///
/// Yields `initial`, `initial * decay`, `initial * decay^2`, … while the
/// value stays strictly above `min_scale`. The first value is yielded
/// unconditionally (see module docs on floor semantics).
#[derive(Clone, Debug)]
pub struct ScaleSchedule {
    next: Option<f64>,
    decay_factor: f64,
    min_scale: f64,
}

impl ScaleSchedule {
    /// Create a schedule from a config. The config is assumed validated.
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            next: Some(config.initial_scale),
            decay_factor: config.decay_factor,
            min_scale: config.min_scale,
        }
    }
}

impl Iterator for ScaleSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let current = self.next.take()?;
        let following = current * self.decay_factor;
        if following > self.min_scale {
            self.next = Some(following);
        }
        Some(current)
    }
}

/// Map natural dimensions and a scale factor to output pixel dimensions.
///
/// Uses `floor` on each axis and clamps to a minimum of 1px, so output
/// dimensions stay valid no matter how small the factor gets before the
/// schedule floor kicks in.
pub fn scaled_dims(natural_w: u32, natural_h: u32, scale: f64) -> (u32, u32) {
    (
        ((natural_w as f64 * scale).floor() as u32).max(1),
        ((natural_h as f64 * scale).floor() as u32).max(1),
    )
}

/// Closed-form upper bound on the number of values a schedule yields.
///
/// `initial * decay^k > min` holds for `k < ln(min/initial) / ln(decay)`,
/// so the count of yielded values is the ceiling of that ratio, and at
/// least 1 because the first value is unconditional. For the defaults this
/// evaluates to 29.
pub fn max_attempts(config: ScheduleConfig) -> u32 {
    let ratio = (config.min_scale / config.initial_scale).ln() / config.decay_factor.ln();
    if ratio <= 0.0 {
        return 1;
    }
    (ratio.ceil() as u32).max(1)
}
