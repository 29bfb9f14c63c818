//! HTTP client for the external speech-recognition service.
//!
//! Speaks the Google-style `speech:recognize` wire format: one POST per
//! recording with base64-encoded LINEAR16 PCM, returning alternatives ranked
//! by confidence. All connection details come from [`RecognitionConfig`].

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Transcriber, TranscriptResult};
use crate::audio::Recording;
use crate::config::RecognitionConfig;

pub struct HttpTranscriber {
    client: reqwest::Client,
    config: RecognitionConfig,
}

impl HttpTranscriber {
    /// Build a transcriber from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is the last-resort fallback if
    /// the builder fails.
    pub fn from_config(config: &RecognitionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognizeConfig<'a>,
    audio: RecognizeAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
struct RecognizeAudio {
    /// Base64-encoded little-endian 16-bit PCM.
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    #[allow(dead_code)]
    confidence: Option<f32>,
}

#[async_trait::async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, recording: &Recording) -> TranscriptResult {
        let pcm_bytes: Vec<u8> = recording
            .samples
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        let body = RecognizeRequest {
            config: RecognizeConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: recording.sample_rate,
                language_code: &self.config.language,
            },
            audio: RecognizeAudio {
                content: base64::engine::general_purpose::STANDARD.encode(&pcm_bytes),
            },
        };

        debug!(
            "Submitting {} bytes of PCM to {}",
            pcm_bytes.len(),
            self.config.endpoint
        );

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Recognition request timed out");
                return TranscriptResult::ServiceUnavailable("request timed out".to_string());
            }
            Err(e) => {
                warn!("Recognition request failed: {}", e);
                return TranscriptResult::ServiceUnavailable(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Recognition service returned {}: {}", status, detail);
            return TranscriptResult::ServiceUnavailable(format!(
                "service returned {}: {}",
                status, detail
            ));
        }

        let parsed: RecognizeResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to parse recognition response: {}", e);
                return TranscriptResult::ServiceUnavailable(format!("malformed response: {}", e));
            }
        };

        // Take the top alternative of each result segment.
        let transcript = parsed
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.trim().is_empty() {
            TranscriptResult::Unintelligible
        } else {
            TranscriptResult::Recognized(transcript)
        }
    }
}
