//! # Compression Session Management
//!
//! High-level orchestration for a batch of input files. Each file gets its
//! own independent search: its own descriptor, config, encoder, reporter
//! and cancellation handle. Searches share no mutable state, so the batch
//! is embarrassingly parallel and runs one tokio task per file.
//!
//! ## Isolation
//!
//! Per-file outcomes are isolated: a file that fails to decode or encode
//! folds into its own [`FileOutcome::Failed`] record and leaves every other
//! search untouched. The session itself only fails on setup problems, never
//! on an individual file.

// Standard library imports
use std::path::{Path, PathBuf};
use std::time::Duration;

// External crate imports
use anyhow::Result;
use futures_util::future::join_all;

// Internal module imports
use crate::encode::{EncodedArtifact, WebpEncoder};
use crate::report::{AttemptReporter, ConsoleReporter, JsonReporter, NullReporter};
use crate::search::{SearchOutcome, SizeTargetingSearch};
use crate::SqueezeOptions;

/// Per-file record of how a search ended.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Budget met; the artifact was written to `output`.
    Fit {
        attempts: u32,
        size_bytes: u64,
        output: PathBuf,
    },
    /// Scale floor crossed; `size_bytes` is the closest size reached.
    Closest { attempts: u32, size_bytes: u64 },
    /// Search cancelled between attempts.
    Cancelled { attempts: u32 },
    /// Decode, encode, or write failure for this file.
    Failed { reason: String },
}

/// Outcome of one input file in a session.
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// The input path as given.
    pub input: PathBuf,
    /// How the search for this file ended.
    pub outcome: FileOutcome,
}

impl SessionResult {
    /// Whether this file hit a hard failure (as opposed to a soft
    /// exhausted/cancelled ending).
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

/// Run one search per input file concurrently and collect the outcomes.
///
/// Results come back in input order regardless of completion order.
pub async fn run_session(options: SqueezeOptions) -> Result<Vec<SessionResult>> {
    let mut handles = Vec::with_capacity(options.inputs.len());
    for input in &options.inputs {
        let input = input.clone();
        let options = options.clone();
        handles.push(tokio::spawn(
            async move { squeeze_one(&input, &options).await },
        ));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (joined, input) in join_all(handles).await.into_iter().zip(&options.inputs) {
        match joined {
            Ok(result) => results.push(result),
            Err(join_err) => results.push(SessionResult {
                input: input.clone(),
                outcome: FileOutcome::Failed {
                    reason: format!("search task panicked: {}", join_err),
                },
            }),
        }
    }
    Ok(results)
}

/// Run the full decode → search → write pipeline for one file.
///
/// Never returns an error: every failure mode folds into the file's own
/// outcome record.
async fn squeeze_one(input: &Path, options: &SqueezeOptions) -> SessionResult {
    let fail = |reason: String| SessionResult {
        input: input.to_path_buf(),
        outcome: FileOutcome::Failed { reason },
    };

    let image = match crate::encode::decode_image(input) {
        Ok(image) => image,
        Err(err) => return fail(err.to_string()),
    };

    let search = SizeTargetingSearch::new(options.search_config())
        .with_attempt_delay(Duration::from_millis(options.delay_ms));
    let mut encoder = WebpEncoder::new();
    let mut reporter = make_reporter(&image.source_name, options);

    let outcome = match search
        .run(&image, &mut encoder, reporter.as_mut())
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return fail(err.to_string()),
    };

    let outcome = match outcome {
        SearchOutcome::Success { final_attempt } => {
            let artifact = EncodedArtifact::from_attempt(&final_attempt, &image.source_name);
            match write_artifact(input, &artifact, options.out_dir.as_deref()) {
                Ok(output) => FileOutcome::Fit {
                    attempts: final_attempt.attempt_index,
                    size_bytes: final_attempt.size,
                    output,
                },
                Err(err) => return fail(err.to_string()),
            }
        }
        SearchOutcome::Exhausted {
            closest_attempt,
            attempts_made,
        } => FileOutcome::Closest {
            attempts: attempts_made,
            size_bytes: closest_attempt.size,
        },
        SearchOutcome::Cancelled { attempts_made } => FileOutcome::Cancelled {
            attempts: attempts_made,
        },
    };

    SessionResult {
        input: input.to_path_buf(),
        outcome,
    }
}

/// Pick the reporter for one file based on the session options.
fn make_reporter(label: &str, options: &SqueezeOptions) -> Box<dyn AttemptReporter> {
    if options.quiet {
        Box::new(NullReporter)
    } else if options.json {
        Box::new(JsonReporter::new(label, std::io::stdout()))
    } else {
        Box::new(ConsoleReporter::new(label))
    }
}

/// Write the artifact next to the input or into the configured directory.
fn write_artifact(
    input: &Path,
    artifact: &EncodedArtifact,
    out_dir: Option<&Path>,
) -> std::io::Result<PathBuf> {
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&dir)?;
    let output = dir.join(&artifact.file_name);
    std::fs::write(&output, artifact.bytes.as_slice())?;
    Ok(output)
}
