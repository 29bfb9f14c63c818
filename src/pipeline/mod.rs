//! The capture → transcribe → score pipeline.
//!
//! [`Pipeline`] sequences the three stages over a [`RecordStore`], with the
//! recorder and transcriber injected behind traits. A session moves through
//! submit (reference text stored) → record (transcript stored, score
//! computed) → results (read back).

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::audio::{CaptureError, Recorder};
use crate::recognize::{Transcriber, TranscriptResult};
use crate::score;
use crate::store::{RecordStore, SessionRecord};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected locally before any record is created.
    #[error("reference text must not be empty")]
    EmptyReference,

    #[error("no session with id {0}")]
    NoSession(u64),

    /// Capture failed; the session stays awaiting recording and the caller
    /// may retry.
    #[error("audio capture failed: {0}")]
    Device(#[from] CaptureError),

    #[error("capture task failed: {0}")]
    CaptureTask(String),
}

pub struct Pipeline {
    store: RecordStore,
    recorder: Arc<dyn Recorder>,
    transcriber: Arc<dyn Transcriber>,
    capture_duration: Duration,
}

impl Pipeline {
    pub fn new(
        recorder: Arc<dyn Recorder>,
        transcriber: Arc<dyn Transcriber>,
        capture_duration: Duration,
    ) -> Self {
        Self {
            store: RecordStore::new(),
            recorder,
            transcriber,
            capture_duration,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Start a new session for `reference_text`; returns its id.
    ///
    /// The new session becomes the latest one, implicitly abandoning any
    /// in-progress session. Empty or whitespace-only text is rejected
    /// without creating a record.
    pub async fn submit(&self, reference_text: &str) -> Result<u64, PipelineError> {
        if reference_text.trim().is_empty() {
            return Err(PipelineError::EmptyReference);
        }

        let id = self.store.create(reference_text).await;
        info!("Session {} created ({} chars)", id, reference_text.len());
        Ok(id)
    }

    /// Capture audio, transcribe it, and score the session.
    ///
    /// Blocks for the full capture duration plus the recognition round trip.
    /// Recognition failures are not fatal: an unintelligible or unavailable
    /// result is stored as an empty transcript and scores 0, so the session
    /// still reaches a displayable result.
    pub async fn record(&self, id: u64) -> Result<SessionRecord, PipelineError> {
        let record = self
            .store
            .get(id)
            .await
            .ok_or(PipelineError::NoSession(id))?;

        info!("Recording for session {}", id);

        // Capture blocks its thread for the whole duration.
        let recorder = Arc::clone(&self.recorder);
        let duration = self.capture_duration;
        let recording = tokio::task::spawn_blocking(move || recorder.capture(duration))
            .await
            .map_err(|e| PipelineError::CaptureTask(e.to_string()))??;

        let transcript = match self.transcriber.transcribe(&recording).await {
            TranscriptResult::Recognized(text) => {
                info!("Session {} recognized: {:?}", id, text);
                text
            }
            TranscriptResult::Unintelligible => {
                warn!("Session {}: audio was unintelligible", id);
                String::new()
            }
            TranscriptResult::ServiceUnavailable(detail) => {
                error!("Session {}: recognition service unavailable: {}", id, detail);
                String::new()
            }
        };

        self.store.set_transcript(id, &transcript).await;

        let percent = score::percent(&record.reference_text, &transcript);
        self.store.set_score(id, percent).await;

        info!("Session {} scored {:.1}", id, percent);

        self.store
            .get(id)
            .await
            .ok_or(PipelineError::NoSession(id))
    }

    /// Fetch a session's record, scoring it if a transcript is present but
    /// the score is not. Recomputing with the same inputs yields the same
    /// score.
    pub async fn results(&self, id: u64) -> Option<SessionRecord> {
        let record = self.store.get(id).await?;
        Some(self.ensure_scored(record).await)
    }

    /// Results for the most recently created session.
    pub async fn latest_results(&self) -> Option<SessionRecord> {
        let record = self.store.latest().await?;
        Some(self.ensure_scored(record).await)
    }

    async fn ensure_scored(&self, record: SessionRecord) -> SessionRecord {
        let Some(transcript) = record.transcript.as_deref() else {
            return record;
        };
        if record.score.is_some() {
            return record;
        }

        let percent = score::percent(&record.reference_text, transcript);
        self.store.set_score(record.id, percent).await;

        SessionRecord {
            score: Some(percent),
            ..record
        }
    }
}
