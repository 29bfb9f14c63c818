use super::state::AppState;
use crate::pipeline::PipelineError;
use crate::store::{SessionRecord, SessionState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitTextRequest {
    /// The text the user intends to read aloud
    pub reference_text: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitTextResponse {
    pub id: u64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub id: u64,
    pub reference_text: String,
    pub transcript: Option<String>,
    /// Similarity in [0, 100]; null while not yet scored
    pub score: Option<f64>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<SessionRecord> for ResultsResponse {
    fn from(record: SessionRecord) -> Self {
        let status = match record.state() {
            SessionState::AwaitingRecording => "awaiting_recording",
            SessionState::Scored => "scored",
        };

        Self {
            id: record.id,
            reference_text: record.reference_text,
            transcript: record.transcript,
            score: record.score,
            status: status.to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /texts
/// Submit reference text and open a new session
pub async fn submit_text(
    State(state): State<AppState>,
    Json(req): Json<SubmitTextRequest>,
) -> impl IntoResponse {
    match state.pipeline.submit(&req.reference_text).await {
        Ok(id) => {
            info!("Created session {}", id);
            (
                StatusCode::OK,
                Json(SubmitTextResponse {
                    id,
                    status: "awaiting_recording".to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ PipelineError::EmptyReference) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /texts/:id/recording
/// Record, transcribe, and score the session
///
/// Blocks for the full capture duration plus the recognition round trip.
pub async fn start_recording(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    info!("Starting recording for session {}", id);

    match state.pipeline.record(id).await {
        Ok(record) => (StatusCode::OK, Json(ResultsResponse::from(record))).into_response(),
        Err(PipelineError::NoSession(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", id),
            }),
        )
            .into_response(),
        Err(e) => {
            // Capture failure: the session stays awaiting recording, so the
            // caller can retry.
            error!("Recording failed for session {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /texts/:id/results
/// Fetch one session's reference text, transcript, and score
pub async fn get_results(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    match state.pipeline.results(id).await {
        Some(record) => (StatusCode::OK, Json(ResultsResponse::from(record))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", id),
            }),
        )
            .into_response(),
    }
}

/// GET /results
/// Fetch results for the most recently created session
pub async fn get_latest_results(State(state): State<AppState>) -> impl IntoResponse {
    match state.pipeline.latest_results().await {
        Some(record) => (StatusCode::OK, Json(ResultsResponse::from(record))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No session has been created yet".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
