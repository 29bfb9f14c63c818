//! In-memory session record store.
//!
//! Records are keyed by a monotonically increasing id starting at 1; the
//! "current" session is always the record with the highest id. There is no
//! deletion path — a new submission simply supersedes the old record as
//! latest, leaving the old one behind.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// One reading session: reference text plus, once recorded, the transcript
/// and its similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: u64,
    pub reference_text: String,

    /// Absent until a recording has completed. Empty string marks a
    /// recording the service could not understand.
    pub transcript: Option<String>,

    /// Similarity score in [0, 100]; absent until scored.
    pub score: Option<f64>,

    pub created_at: DateTime<Utc>,
}

/// Where a session is in the submit → record → score flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingRecording,
    Scored,
}

impl SessionRecord {
    pub fn state(&self) -> SessionState {
        if self.transcript.is_some() {
            SessionState::Scored
        } else {
            SessionState::AwaitingRecording
        }
    }
}

/// Record store shared across HTTP handlers.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<SessionRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record holding only the reference text; returns its id.
    pub async fn create(&self, reference_text: &str) -> u64 {
        let mut records = self.records.write().await;
        let id = records.len() as u64 + 1;
        records.push(SessionRecord {
            id,
            reference_text: reference_text.to_string(),
            transcript: None,
            score: None,
            created_at: Utc::now(),
        });
        id
    }

    pub async fn get(&self, id: u64) -> Option<SessionRecord> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id == id).cloned()
    }

    /// The most recently created record, if any.
    pub async fn latest(&self) -> Option<SessionRecord> {
        let records = self.records.read().await;
        records.last().cloned()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Store a transcript and drop any stale score so it gets recomputed
    /// from the new pair.
    pub async fn set_transcript(&self, id: u64, transcript: &str) {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.transcript = Some(transcript.to_string());
            record.score = None;
        }
    }

    pub async fn set_score(&self, id: u64, score: f64) {
        let mut records = self.records.write().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.score = Some(score);
        }
    }
}
