//! WAV persistence for captured recordings.

use anyhow::{Context, Result};
use hound::{WavReader, WavSpec, WavWriter};
use std::path::Path;

use super::capture::Recording;

/// Write a mono 16-bit recording to `path`, replacing any existing file.
pub fn write_recording(path: impl AsRef<Path>, recording: &Recording) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: recording.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in &recording.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

/// Read a mono 16-bit WAV back as a [`Recording`].
pub fn read_recording(path: impl AsRef<Path>) -> Result<Recording> {
    let path = path.as_ref();

    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let spec = reader.spec();
    anyhow::ensure!(
        spec.channels == 1 && spec.bits_per_sample == 16,
        "Expected mono 16-bit WAV, got {}ch {}-bit",
        spec.channels,
        spec.bits_per_sample
    );

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read audio samples")?;

    Ok(Recording {
        samples,
        sample_rate: spec.sample_rate,
    })
}
