pub mod audio;
pub mod config;
pub mod http;
pub mod pipeline;
pub mod recognize;
pub mod score;
pub mod store;

pub use audio::{CaptureError, MicCapture, Recorder, Recording};
pub use config::Config;
pub use http::{create_router, AppState};
pub use pipeline::{Pipeline, PipelineError};
pub use recognize::{HttpTranscriber, Transcriber, TranscriptResult};
pub use store::{RecordStore, SessionRecord, SessionState};
