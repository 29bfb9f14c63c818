// Integration tests for the capture → transcribe → score pipeline.
//
// The recorder and transcriber are faked so these run without a microphone
// or network access.

mod common;

use common::{FakeRecorder, FakeTranscriber};
use readback::{Pipeline, PipelineError, SessionState};
use std::sync::Arc;
use std::time::Duration;

fn pipeline(recorder: FakeRecorder, transcriber: FakeTranscriber) -> Pipeline {
    Pipeline::new(
        Arc::new(recorder),
        Arc::new(transcriber),
        Duration::from_millis(1),
    )
}

#[tokio::test]
async fn empty_reference_is_rejected_without_a_record() {
    let pipeline = pipeline(FakeRecorder::silent(), FakeTranscriber::recognizing("x"));

    let err = pipeline.submit("").await.unwrap_err();
    assert!(matches!(err, PipelineError::EmptyReference));

    let err = pipeline.submit("   \n").await.unwrap_err();
    assert!(matches!(err, PipelineError::EmptyReference));

    assert_eq!(pipeline.store().count().await, 0);
    assert!(pipeline.latest_results().await.is_none());
}

#[tokio::test]
async fn results_before_recording_have_no_score() {
    let pipeline = pipeline(FakeRecorder::silent(), FakeTranscriber::recognizing("x"));

    let id = pipeline.submit("hello world").await.unwrap();
    let record = pipeline.results(id).await.unwrap();

    assert_eq!(record.reference_text, "hello world");
    assert!(record.transcript.is_none());
    assert!(record.score.is_none());
    assert_eq!(record.state(), SessionState::AwaitingRecording);
}

#[tokio::test]
async fn exact_readback_scores_one_hundred() {
    let pipeline = pipeline(
        FakeRecorder::silent(),
        FakeTranscriber::recognizing("hello world"),
    );

    let id = pipeline.submit("hello world").await.unwrap();
    let record = pipeline.record(id).await.unwrap();

    assert_eq!(record.transcript.as_deref(), Some("hello world"));
    let score = record.score.unwrap();
    assert!((score - 100.0).abs() < 1e-9, "got {}", score);
    assert_eq!(record.state(), SessionState::Scored);
}

#[tokio::test]
async fn partial_readback_scores_between_zero_and_one_hundred() {
    let pipeline = pipeline(
        FakeRecorder::silent(),
        FakeTranscriber::recognizing("goodbye world"),
    );

    let id = pipeline.submit("hello world").await.unwrap();
    let record = pipeline.record(id).await.unwrap();

    let score = record.score.unwrap();
    assert!(score > 0.0 && score < 100.0, "got {}", score);
}

#[tokio::test]
async fn unintelligible_audio_stores_empty_transcript_and_zero_score() {
    let pipeline = pipeline(FakeRecorder::silent(), FakeTranscriber::unintelligible());

    let id = pipeline.submit("hello world").await.unwrap();
    let record = pipeline.record(id).await.unwrap();

    assert_eq!(record.transcript.as_deref(), Some(""));
    assert_eq!(record.score, Some(0.0));
}

#[tokio::test]
async fn service_failure_still_reaches_a_scored_result() {
    let pipeline = pipeline(
        FakeRecorder::silent(),
        FakeTranscriber::unavailable("quota exceeded"),
    );

    let id = pipeline.submit("hello world").await.unwrap();
    let record = pipeline.record(id).await.unwrap();

    assert_eq!(record.transcript.as_deref(), Some(""));
    assert_eq!(record.score, Some(0.0));
}

#[tokio::test]
async fn device_failure_leaves_session_retryable() {
    let pipeline = pipeline(
        FakeRecorder::failing_then_ok(),
        FakeTranscriber::recognizing("hello world"),
    );

    let id = pipeline.submit("hello world").await.unwrap();

    let err = pipeline.record(id).await.unwrap_err();
    assert!(matches!(err, PipelineError::Device(_)));

    // Nothing was persisted by the failed attempt.
    let record = pipeline.results(id).await.unwrap();
    assert!(record.transcript.is_none());
    assert!(record.score.is_none());
    assert_eq!(record.state(), SessionState::AwaitingRecording);

    // A second attempt goes through.
    let record = pipeline.record(id).await.unwrap();
    assert_eq!(record.score, Some(100.0));
}

#[tokio::test]
async fn recording_an_unknown_session_fails() {
    let pipeline = pipeline(FakeRecorder::silent(), FakeTranscriber::recognizing("x"));

    let err = pipeline.record(42).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoSession(42)));
}

#[tokio::test]
async fn results_are_idempotent() {
    let pipeline = pipeline(
        FakeRecorder::silent(),
        FakeTranscriber::recognizing("goodbye world"),
    );

    let id = pipeline.submit("hello world").await.unwrap();
    pipeline.record(id).await.unwrap();

    let first = pipeline.results(id).await.unwrap();
    let second = pipeline.results(id).await.unwrap();
    assert_eq!(first.score, second.score);
}

#[tokio::test]
async fn new_submission_becomes_the_latest_session() {
    let pipeline = pipeline(
        FakeRecorder::silent(),
        FakeTranscriber::recognizing("hello world"),
    );

    let first = pipeline.submit("hello world").await.unwrap();
    pipeline.record(first).await.unwrap();

    let second = pipeline.submit("a fresh start").await.unwrap();
    assert!(second > first);

    // The latest session has no transcript yet; the old one keeps its score.
    let latest = pipeline.latest_results().await.unwrap();
    assert_eq!(latest.id, second);
    assert!(latest.score.is_none());

    let old = pipeline.results(first).await.unwrap();
    assert_eq!(old.score, Some(100.0));
}
