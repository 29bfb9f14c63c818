// Shared test doubles for the pipeline's hardware and network seams.

#![allow(dead_code)]

use readback::{CaptureError, Recorder, Recording, Transcriber, TranscriptResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Recorder that replays canned capture outcomes instead of touching
/// hardware. Outcomes are consumed in order, one per `capture` call.
pub struct FakeRecorder {
    outcomes: Mutex<VecDeque<Result<Recording, CaptureError>>>,
}

impl FakeRecorder {
    pub fn new(outcomes: Vec<Result<Recording, CaptureError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }

    /// A recorder that always succeeds with a short silent recording.
    pub fn silent() -> Self {
        Self::new(vec![Ok(silence())])
    }

    /// A recorder whose first capture fails as if no device were present,
    /// and whose second succeeds.
    pub fn failing_then_ok() -> Self {
        Self::new(vec![Err(CaptureError::NoDevice), Ok(silence())])
    }
}

impl Recorder for FakeRecorder {
    fn capture(&self, _duration: Duration) -> Result<Recording, CaptureError> {
        self.outcomes
            .lock()
            .expect("outcomes mutex poisoned")
            .pop_front()
            .unwrap_or(Err(CaptureError::NoDevice))
    }
}

/// Transcriber that returns a fixed result without any network traffic.
pub struct FakeTranscriber {
    result: TranscriptResult,
}

impl FakeTranscriber {
    pub fn recognizing(text: &str) -> Self {
        Self {
            result: TranscriptResult::Recognized(text.to_string()),
        }
    }

    pub fn unintelligible() -> Self {
        Self {
            result: TranscriptResult::Unintelligible,
        }
    }

    pub fn unavailable(detail: &str) -> Self {
        Self {
            result: TranscriptResult::ServiceUnavailable(detail.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _recording: &Recording) -> TranscriptResult {
        self.result.clone()
    }
}

pub fn silence() -> Recording {
    Recording {
        samples: vec![0; 16_000],
        sample_rate: 16_000,
    }
}
