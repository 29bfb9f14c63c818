use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Fixed capture duration in seconds.
    pub duration_secs: u64,
    /// Target sample rate for the recognition service.
    pub sample_rate: u32,
    /// Fixed path the capture writes over on every recording.
    pub wav_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    pub endpoint: String,
    /// Sent as a bearer token when present and non-empty.
    pub api_key: Option<String>,
    pub language: String,
    /// Per-request timeout for the recognition round trip.
    pub timeout_secs: u64,
}

impl Config {
    /// Load config from a TOML file, falling back to built-in defaults for
    /// anything the file does not set. The file itself is optional.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "readback")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8080)?
            .set_default("audio.duration_secs", 10)?
            .set_default("audio.sample_rate", 16000)?
            .set_default("audio.wav_path", "mic_recording.wav")?
            .set_default(
                "recognition.endpoint",
                "https://speech.googleapis.com/v1/speech:recognize",
            )?
            .set_default("recognition.language", "en-US")?
            .set_default("recognition.timeout_secs", 30)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
