//! Speech I/O: microphone capture, remote recognition and synthesis,
//! and local playback.

mod capture;
mod playback;
mod recognition;
mod synthesis;

pub use capture::{Recording, capture_phrase};
pub use playback::AudioPlayer;
pub use recognition::RecognitionClient;
pub use synthesis::SynthesisClient;

/// Encoding of a synthesized audio clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mp3 => write!(f, "mp3"),
        }
    }
}

/// Synthesized audio held in memory.
///
/// The clip is owned by the translate-and-speak cycle that produced it
/// and handed to the player by reference. Nothing is ever written to
/// disk, so there is no file lifetime to manage.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn mp3(data: Vec<u8>) -> Self {
        Self {
            data,
            format: AudioFormat::Mp3,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
