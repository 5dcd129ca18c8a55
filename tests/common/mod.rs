//! Common test utilities for the pixel-squeeze integration tests.
//!
//! Provides a deterministic stub encoder and a recording reporter so the
//! search loop can be exercised without touching a real codec.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use pixel_squeeze::encode::AttemptEncoder;
use pixel_squeeze::error::{SqueezeError, SqueezeResult};
use pixel_squeeze::report::{AttemptReporter, TerminalEvent};
use pixel_squeeze::search::{AttemptResult, CancelHandle, ImageDescriptor};

/// One scripted response of the stub encoder.
#[derive(Clone, Copy, Debug)]
pub enum StubStep {
    /// Return a buffer of exactly this many bytes.
    Bytes(usize),
    /// Fail with an encode error.
    Fail,
}

/// How the stub answers encode calls.
enum StubMode {
    /// Scripted responses, one per call, in order.
    Script(Vec<StubStep>),
    /// Deterministic size derived from the requested dimensions:
    /// `width * height / divisor`.
    Area { divisor: usize },
}

/// Deterministic encoder stub. Records every call it receives.
pub struct StubEncoder {
    mode: StubMode,
    /// (width, height) of every encode call, in order.
    pub calls: Vec<(u32, u32)>,
}

impl StubEncoder {
    /// Stub that plays back `script`, one step per call. Calls beyond the
    /// script repeat the last step.
    pub fn scripted(script: Vec<StubStep>) -> Self {
        assert!(!script.is_empty(), "script must have at least one step");
        Self {
            mode: StubMode::Script(script),
            calls: Vec::new(),
        }
    }

    /// Stub that always returns the same size.
    pub fn constant(bytes: usize) -> Self {
        Self::scripted(vec![StubStep::Bytes(bytes)])
    }

    /// Stub whose size shrinks with the requested area, making success
    /// scale-dependent and fully reproducible.
    pub fn area_sized(divisor: usize) -> Self {
        Self {
            mode: StubMode::Area { divisor },
            calls: Vec::new(),
        }
    }
}

#[async_trait]
impl AttemptEncoder for StubEncoder {
    async fn encode(
        &mut self,
        _image: &ImageDescriptor,
        width: u32,
        height: u32,
        _quality: f32,
    ) -> SqueezeResult<Vec<u8>> {
        let call_index = self.calls.len();
        self.calls.push((width, height));
        match &self.mode {
            StubMode::Script(script) => {
                let step = script[call_index.min(script.len() - 1)];
                match step {
                    StubStep::Bytes(n) => Ok(vec![0u8; n]),
                    StubStep::Fail => Err(SqueezeError::encode(
                        "stub_encode",
                        format!("scripted failure on call {}", call_index + 1),
                    )),
                }
            }
            StubMode::Area { divisor } => {
                let size = (width as usize * height as usize) / divisor;
                Ok(vec![0u8; size])
            }
        }
    }
}

/// Flat, owned record of one reporter event, comparable across runs.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Progress {
        attempt_index: u32,
        width: u32,
        height: u32,
        size: u64,
    },
    Success {
        attempts: u32,
        size: u64,
        target_bytes: u64,
    },
    Exhausted {
        attempts: u32,
        closest_size: u64,
    },
    Cancelled {
        attempts: u32,
    },
    Failed {
        attempts: u32,
    },
}

/// Reporter that records every event and can optionally raise a cancel
/// handle after the n-th progress event, emulating a caller pressing stop
/// between attempts.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
    /// Scales observed in progress events, for monotonicity assertions.
    pub scales: Vec<f64>,
    cancel_after: Option<(u32, CancelHandle)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `handle` once `attempts` progress events have been seen.
    pub fn cancel_after(mut self, attempts: u32, handle: CancelHandle) -> Self {
        self.cancel_after = Some((attempts, handle));
        self
    }

    /// All progress events, in order.
    pub fn progress_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Progress { .. }))
            .collect()
    }

    /// All terminal events, in order. Exactly one is expected per search.
    pub fn terminal_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| !matches!(e, Event::Progress { .. }))
            .collect()
    }
}

impl AttemptReporter for RecordingReporter {
    fn on_progress(&mut self, attempt: &AttemptResult) {
        self.scales.push(attempt.scale);
        self.events.push(Event::Progress {
            attempt_index: attempt.attempt_index,
            width: attempt.width,
            height: attempt.height,
            size: attempt.size,
        });
        if let Some((after, handle)) = &self.cancel_after {
            if attempt.attempt_index >= *after {
                handle.cancel();
            }
        }
    }

    fn on_terminal(&mut self, event: &TerminalEvent<'_>) {
        let recorded = match event {
            TerminalEvent::Success {
                attempt,
                target_bytes,
            } => Event::Success {
                attempts: attempt.attempt_index,
                size: attempt.size,
                target_bytes: *target_bytes,
            },
            TerminalEvent::Exhausted {
                closest,
                attempts_made,
            } => Event::Exhausted {
                attempts: *attempts_made,
                closest_size: closest.size,
            },
            TerminalEvent::Cancelled { attempts_made } => Event::Cancelled {
                attempts: *attempts_made,
            },
            TerminalEvent::Failed { attempts_made, .. } => Event::Failed {
                attempts: *attempts_made,
            },
        };
        self.events.push(recorded);
    }
}

/// A plain RGBA descriptor for search tests; pixel content is irrelevant to
/// the stub encoder.
pub fn test_image(width: u32, height: u32) -> ImageDescriptor {
    let pixels = Arc::new(vec![128u8; width as usize * height as usize * 4]);
    ImageDescriptor::new(width, height, pixels, "test.png").expect("valid test image")
}
