// SPDX-License-Identifier: MIT
//! # squeeze-scale: Scale Math for Budget-Targeted Image Compression
//!
//! This crate provides the pure, dependency-light math behind budget-targeted
//! image re-encoding: geometric scale schedules, output dimension computation,
//! byte-budget presets, and a SIMD-accelerated CPU resize helper.
//!
//! ## Architecture Overview
//!
//! The crate is split into three small modules:
//!
//! - [`schedule`]: Geometric decay schedules and scaled-dimension computation.
//!   A [`schedule::ScaleSchedule`] yields a strictly decreasing sequence of
//!   scale factors down to an exclusive floor, which is what makes the outer
//!   search loop terminate in a bounded number of attempts.
//! - [`presets`]: Named byte budgets for common delivery targets and the
//!   inclusive clamp applied to user-supplied targets.
//! - [`cpu`]: CPU resize of tightly-packed RGBA buffers using
//!   fast_image_resize (AVX2/AVX-512 when available).
//!
//! ## Convergence Characteristics
//!
//! With the default schedule (initial 1.0, decay 0.9, floor 0.05) a search
//! performs at most 29 attempts. The bound is closed-form:
//! `ceil(ln(min/initial) / ln(decay))`, see [`schedule::max_attempts`].
//!
//! ## Usage Example
//!
//! ```rust
//! use squeeze_scale::schedule::{ScaleSchedule, ScheduleConfig, scaled_dims};
//!
//! let config = ScheduleConfig::default();
//! for scale in ScaleSchedule::new(config) {
//!     let (w, h) = scaled_dims(1920, 1080, scale);
//!     assert!(w >= 1 && h >= 1);
//! }
//! ```

pub mod cpu;
pub mod presets;
pub mod schedule;
