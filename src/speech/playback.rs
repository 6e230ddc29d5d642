use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;

use super::AudioClip;
use crate::pipeline::Play;

/// Plays synthesized clips on the default output device.
///
/// The output stream is opened per clip and closed when playback ends,
/// mirroring the one-clip-per-cycle ownership of the pipeline.
pub struct AudioPlayer;

impl AudioPlayer {
    pub const fn new() -> Self {
        Self
    }

    /// Decodes and plays a clip, blocking until it finishes.
    pub fn play_clip(&self, clip: &AudioClip) -> Result<()> {
        let (_stream, handle) =
            OutputStream::try_default().context("No audio output device available")?;

        let sink = Sink::try_new(&handle).context("Failed to open audio output")?;

        let cursor = Cursor::new(clip.data.clone());
        let source = Decoder::new(cursor)
            .with_context(|| format!("Failed to decode {} audio", clip.format))?;

        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Play for AudioPlayer {
    fn play(&self, clip: &AudioClip) -> Result<()> {
        self.play_clip(clip)
    }
}
