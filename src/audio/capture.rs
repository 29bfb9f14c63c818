//! Microphone capture via `cpal`.
//!
//! [`MicCapture`] records a fixed-duration sample from the system default
//! input device, downmixes to mono 16-bit PCM, and writes the buffer to a
//! fixed-path WAV file (overwriting any prior recording). The capture blocks
//! the calling thread for the full duration; run it on a blocking task.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// A completed capture: mono 16-bit PCM plus the rate it was recorded at.
///
/// The rate can differ from the requested target when the device's native
/// rate is not an integer multiple of it (decimation keeps the nearest
/// integer divisor).
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl Recording {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Errors that can occur while setting up or running a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no input device found on the default audio host")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported input sample format {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("failed to write recording WAV: {0}")]
    Wav(#[from] hound::Error),
}

/// Capture seam so the pipeline can be driven by a fake in tests.
pub trait Recorder: Send + Sync {
    /// Record for exactly `duration`, blocking the calling thread.
    fn capture(&self, duration: Duration) -> Result<Recording, CaptureError>;
}

/// Records from the system default input device.
///
/// The device is opened fresh on every [`capture`](Recorder::capture) call
/// and released when the call returns, so a failed capture can simply be
/// retried. No concurrent capture is supported.
pub struct MicCapture {
    target_sample_rate: u32,
    wav_path: PathBuf,
}

impl MicCapture {
    pub fn new(target_sample_rate: u32, wav_path: impl Into<PathBuf>) -> Self {
        Self {
            target_sample_rate,
            wav_path: wav_path.into(),
        }
    }
}

impl Recorder for MicCapture {
    fn capture(&self, duration: Duration) -> Result<Recording, CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
        let supported = device.default_input_config()?;

        let native_rate = supported.sample_rate().0;
        let channels = supported.channels();
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        info!(
            "Starting capture: {:.1}s at {}Hz, {} channel(s)",
            duration.as_secs_f64(),
            native_rate,
            channels
        );

        let buffer: Arc<Mutex<Vec<i16>>> = Arc::new(Mutex::new(Vec::new()));

        // The cpal callback runs on a dedicated audio thread; samples are
        // converted to i16 and appended under the mutex.
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                let buffer = Arc::clone(&buffer);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let mut buf = buffer.lock().unwrap_or_else(|e| e.into_inner());
                        buf.extend(data.iter().map(|&s| {
                            (s * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16
                        }));
                    },
                    stream_error,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let buffer = Arc::clone(&buffer);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let mut buf = buffer.lock().unwrap_or_else(|e| e.into_inner());
                        buf.extend_from_slice(data);
                    },
                    stream_error,
                    None,
                )?
            }
            cpal::SampleFormat::U16 => {
                let buffer = Arc::clone(&buffer);
                device.build_input_stream(
                    &config,
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        let mut buf = buffer.lock().unwrap_or_else(|e| e.into_inner());
                        buf.extend(data.iter().map(|&s| (s as i32 - 32768) as i16));
                    },
                    stream_error,
                    None,
                )?
            }
            other => return Err(CaptureError::UnsupportedFormat(other)),
        };

        stream.play()?;
        std::thread::sleep(duration);
        drop(stream);

        let raw = {
            let mut buf = buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buf)
        };

        let mono = downmix_to_mono(&raw, channels);
        let (samples, sample_rate) = decimate(mono, native_rate, self.target_sample_rate);

        let recording = Recording {
            samples,
            sample_rate,
        };

        super::wav::write_recording(&self.wav_path, &recording)?;

        info!(
            "Capture complete: {:.1}s at {}Hz, saved to {}",
            recording.duration_seconds(),
            recording.sample_rate,
            self.wav_path.display()
        );

        Ok(recording)
    }
}

fn stream_error(err: cpal::StreamError) {
    error!("Input stream error: {}", err);
}

/// Sum interleaved channels into mono, clamping to the i16 range.
fn downmix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let n = channels as usize;
    let mut mono = Vec::with_capacity(samples.len() / n);

    for frame in samples.chunks_exact(n) {
        let sum: i32 = frame.iter().map(|&s| s as i32).sum();
        mono.push(sum.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
    }

    mono
}

/// Downsample by integer decimation. Returns the samples and the actual
/// rate they ended up at. Never upsamples.
fn decimate(samples: Vec<i16>, native_rate: u32, target_rate: u32) -> (Vec<i16>, u32) {
    if native_rate <= target_rate {
        return (samples, native_rate);
    }

    let step = (native_rate / target_rate) as usize;
    if step <= 1 {
        return (samples, native_rate);
    }

    let decimated: Vec<i16> = samples.into_iter().step_by(step).collect();
    (decimated, native_rate / step as u32)
}
