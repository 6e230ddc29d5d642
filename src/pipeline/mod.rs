//! The translate-and-speak pipeline.
//!
//! One pipeline serves both input modes (typed text and transcribed
//! speech); the commands acquire the text and hand it to
//! [`Pipeline::run`]. The client seams are traits so the flow can be
//! exercised against in-memory doubles.

mod cycle;

pub use cycle::{CycleOutcome, Pipeline, PlaybackOutcome, Voice};

use anyhow::Result;
use async_trait::async_trait;

use crate::speech::AudioClip;
use crate::translation::Language;

/// Translates text into a target language.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str, target: &Language) -> Result<String>;
}

/// Synthesizes text into an audio clip.
///
/// `None` means there was nothing to say (empty input); it is not an
/// error.
#[async_trait]
pub trait Synthesize: Send + Sync {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Option<AudioClip>>;
}

/// Renders an audio clip for the user.
pub trait Play: Send + Sync {
    fn play(&self, clip: &AudioClip) -> Result<()>;
}
