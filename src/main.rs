use anyhow::Result;
use clap::Parser;
use readback::{create_router, AppState, Config, HttpTranscriber, MicCapture, Pipeline};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "readback", about = "Read-aloud accuracy checker")]
struct Args {
    /// Path to the config file (TOML, extension omitted)
    #[arg(long, default_value = "config/readback")]
    config: String,

    /// Override the HTTP port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "Capture: {}s at {}Hz, recording to {}",
        cfg.audio.duration_secs, cfg.audio.sample_rate, cfg.audio.wav_path
    );
    info!("Recognition endpoint: {}", cfg.recognition.endpoint);

    let recorder = Arc::new(MicCapture::new(cfg.audio.sample_rate, &cfg.audio.wav_path));
    let transcriber = Arc::new(HttpTranscriber::from_config(&cfg.recognition));
    let pipeline = Arc::new(Pipeline::new(
        recorder,
        transcriber,
        Duration::from_secs(cfg.audio.duration_secs),
    ));

    let app = create_router(AppState::new(pipeline));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
