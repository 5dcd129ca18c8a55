//! # Pixel Squeeze Library
//!
//! Budget-targeted image compression: re-encode a raster image at
//! geometrically decreasing resolution until the encoded size fits under a
//! caller-specified byte budget or a minimum-scale floor is reached.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `search`: The size-targeting attempt loop and its value types
//! - `encode`: The resize+encode boundary (WebP backend, file decode)
//! - `report`: Progress/terminal event sinks (console, JSON, null)
//! - `config`: Run configuration and validation
//! - `session`: Per-file task orchestration for batches
//!
//! The scale math itself (decay schedules, dimension computation, budget
//! presets, CPU resize) lives in the `squeeze-scale` member crate.
//!
//! ## Features
//!
//! - **Bounded search**: geometric decay guarantees termination in at most
//!   ~29 attempts with default settings
//! - **Decoupled progress**: every attempt is a structured event, rendered
//!   by pluggable reporters that cannot affect the search
//! - **Cancellation**: first-class cancel handle observed between attempts
//! - **Parallel batches**: independent searches share no mutable state and
//!   run concurrently, one task per file
//!
//! ## Example
//!
//! ```rust,no_run
//! use pixel_squeeze::SqueezeOptions;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = SqueezeOptions {
//!     inputs: vec!["photo.png".into()],
//!     target_bytes: 500 * 1024,
//!     quality: 0.97,
//!     out_dir: None,
//!     delay_ms: 0,
//!     json: false,
//!     quiet: false,
//! };
//!
//! let results = pixel_squeeze::squeeze_files(options).await?;
//! for result in results {
//!     println!("{}: {:?}", result.input.display(), result.outcome);
//! }
//! # Ok(())
//! # }
//! ```

// Standard library imports
use std::path::PathBuf;

// External crate imports
use anyhow::Result;
use squeeze_scale::schedule::ScheduleConfig;

// Internal module imports
pub mod config;
pub mod encode;
pub mod error;
pub mod report;
pub mod search;
pub mod session;

/// Re-export error types for convenience
pub use error::{HasSeverity, Retryable, SqueezeError, SqueezeResult};

/// Re-export the core search types for convenience
pub use search::{
    AttemptResult, CancelHandle, ImageDescriptor, SearchConfig, SearchOutcome, SizeTargetingSearch,
};

pub use report::{AttemptReporter, TerminalEvent};
pub use session::{FileOutcome, SessionResult};

/// Options for one compression run.
///
/// This struct encapsulates everything a batch needs: the input files, the
/// per-image byte budget, the fixed codec quality, and output/reporting
/// knobs. Budgets are expressed in bytes here; the config layer clamps
/// user-facing KB values into the supported range before building options.
///
/// # Examples
///
/// ```rust
/// use pixel_squeeze::SqueezeOptions;
///
/// let options = SqueezeOptions {
///     inputs: vec!["holiday.jpg".into()],
///     target_bytes: 100 * 1024,  // avatar-sized
///     quality: 0.97,
///     out_dir: Some("out".into()),
///     delay_ms: 80,
///     json: false,
///     quiet: false,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SqueezeOptions {
    /// Source image files; one independent search per entry.
    pub inputs: Vec<PathBuf>,

    /// Maximum acceptable encoded size per image, in bytes.
    pub target_bytes: u64,

    /// Codec quality in (0, 1], fixed for every attempt.
    ///
    /// The search varies only scale; quality never moves during a run.
    pub quality: f32,

    /// Destination directory for artifacts; `None` writes next to each
    /// source file.
    pub out_dir: Option<PathBuf>,

    /// Cooperative pause between attempts in milliseconds.
    ///
    /// Scheduling courtesy toward concurrent searches; does not change any
    /// outcome or attempt count.
    pub delay_ms: u64,

    /// Emit one JSON record per event instead of human-readable lines.
    pub json: bool,

    /// Suppress per-attempt reporting entirely.
    pub quiet: bool,
}

impl SqueezeOptions {
    /// The immutable per-search configuration these options imply.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            target_bytes: self.target_bytes,
            schedule: ScheduleConfig::default(),
            quality: self.quality,
        }
    }
}

/// Main entry point for batch compression runs.
///
/// Runs one size-targeting search per input file, concurrently, and
/// collects a per-file outcome record. Individual file failures (unreadable
/// image, codec rejection, write error) are folded into their own records;
/// the returned `Result` only fails on setup-level problems.
///
/// # Examples
///
/// ```rust,no_run
/// use pixel_squeeze::{SqueezeOptions, squeeze_files};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let options = SqueezeOptions {
///         inputs: vec!["photo.png".into()],
///         target_bytes: 500 * 1024,
///         quality: 0.97,
///         out_dir: None,
///         delay_ms: 80,
///         json: false,
///         quiet: false,
///     };
///
///     for result in squeeze_files(options).await? {
///         println!("{}: {:?}", result.input.display(), result.outcome);
///     }
///     Ok(())
/// }
/// ```
pub async fn squeeze_files(options: SqueezeOptions) -> Result<Vec<SessionResult>> {
    session::run_session(options).await
}
