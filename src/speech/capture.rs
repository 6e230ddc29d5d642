//! One-shot microphone phrase capture.
//!
//! Opens the default input device for the duration of a single call,
//! calibrates an ambient-noise threshold, waits for speech, and records
//! until the speaker pauses or the maximum phrase length is reached.

use anyhow::{Context, Result, bail};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use std::time::{Duration, Instant};

/// Time spent sampling background noise before listening.
const AMBIENT_CALIBRATION: Duration = Duration::from_millis(500);

/// How long to wait for speech to begin.
const SPEECH_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum length of a captured phrase.
const MAX_PHRASE: Duration = Duration::from_secs(5);

/// Silence after speech that ends the phrase early.
const TRAILING_SILENCE: Duration = Duration::from_millis(900);

/// Speech must be at least this loud, whatever the ambient level.
const SPEECH_RMS_FLOOR: f32 = 0.015;

/// Speech threshold relative to the calibrated ambient RMS.
const AMBIENT_MULTIPLIER: f32 = 2.5;

/// Mono audio captured from the microphone.
#[derive(Debug, Clone)]
pub struct Recording {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Recording {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encodes the recording as 16-bit PCM WAV, entirely in memory.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer =
                WavWriter::new(&mut cursor, spec).context("Failed to create WAV writer")?;

            for &sample in &self.samples {
                let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
                writer
                    .write_sample(sample_i16)
                    .context("Failed to write WAV sample")?;
            }

            writer.finalize().context("Failed to finalize WAV data")?;
        }

        Ok(cursor.into_inner())
    }
}

/// Captures one spoken phrase from the default input device.
///
/// # Errors
///
/// Returns an error if no input device is available, the device does
/// not produce f32 samples, or no speech starts within the timeout.
pub fn capture_phrase() -> Result<Recording> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .context("No microphone input device available")?;

    let supported = device
        .default_input_config()
        .context("Failed to query input device configuration")?;

    if supported.sample_format() != cpal::SampleFormat::F32 {
        bail!(
            "Unsupported input sample format: {:?}",
            supported.sample_format()
        );
    }

    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;
    let config: cpal::StreamConfig = supported.into();

    let (tx, rx) = bounded::<Vec<f32>>(64);

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // Fold interleaved frames down to mono
                let mono: Vec<f32> = if channels == 1 {
                    data.to_vec()
                } else {
                    data.chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                        .collect()
                };

                // Dropped chunks are fine; the collector keeps up in practice
                let _ = tx.try_send(mono);
            },
            |err| {
                crate::warn!("Audio input stream error: {err}");
            },
            None,
        )
        .context("Failed to open microphone stream")?;

    stream.play().context("Failed to start microphone stream")?;

    let recording = collect_phrase(&rx, sample_rate);

    // Closes the device before returning, success or not
    drop(stream);

    recording
}

fn collect_phrase(rx: &Receiver<Vec<f32>>, sample_rate: u32) -> Result<Recording> {
    let threshold = calibrate_threshold(rx);

    // Wait for the phrase to begin
    let wait_deadline = Instant::now() + SPEECH_TIMEOUT;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let now = Instant::now();
        if now >= wait_deadline {
            bail!(
                "No speech detected within {} seconds",
                SPEECH_TIMEOUT.as_secs()
            );
        }

        match rx.recv_timeout(wait_deadline - now) {
            Ok(chunk) => {
                if rms(&chunk) >= threshold {
                    samples.extend_from_slice(&chunk);
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => bail!("Microphone stream closed unexpectedly"),
        }
    }

    // Record until the speaker pauses or the phrase cap is hit
    let phrase_start = Instant::now();
    let mut quiet_since: Option<Instant> = None;

    while phrase_start.elapsed() < MAX_PHRASE {
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(chunk) => {
                let loud = rms(&chunk) >= threshold;
                samples.extend_from_slice(&chunk);

                if loud {
                    quiet_since = None;
                } else {
                    let since = *quiet_since.get_or_insert_with(Instant::now);
                    if since.elapsed() >= TRAILING_SILENCE {
                        break;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(Recording {
        samples,
        sample_rate,
    })
}

/// Samples background noise and derives the speech threshold from it.
fn calibrate_threshold(rx: &Receiver<Vec<f32>>) -> f32 {
    let deadline = Instant::now() + AMBIENT_CALIBRATION;
    let mut ambient: Vec<f32> = Vec::new();

    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(chunk) => ambient.extend_from_slice(&chunk),
            Err(_) => break,
        }
    }

    (rms(&ambient) * AMBIENT_MULTIPLIER).max(SPEECH_RMS_FLOOR)
}

/// Root-mean-square energy of a sample window.
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}
