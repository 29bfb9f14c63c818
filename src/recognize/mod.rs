pub mod client;

pub use client::HttpTranscriber;

use crate::audio::Recording;

/// Outcome of a single recognition round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptResult {
    /// The service returned a confident transcription.
    Recognized(String),
    /// The service processed the audio but could not map it to text.
    Unintelligible,
    /// Network or service-level failure (timeout, quota, malformed request).
    ServiceUnavailable(String),
}

/// Speech-to-text seam. Each call is one round trip to the external
/// service; no retry or backoff is performed here.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, recording: &Recording) -> TranscriptResult;
}
