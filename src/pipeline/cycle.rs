use anyhow::Result;

use super::{Play, Synthesize, Translate};
use crate::translation::Language;

/// What happened to the audio half of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The translation was synthesized and played.
    Played,
    /// Audio was not requested, or the synthesizer had nothing to say.
    Skipped,
    /// Synthesis or playback failed; the translation is still usable.
    Failed(String),
}

/// Result of one user-initiated cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Blank input or an empty transcription; no client was invoked.
    NoInput,
    /// The text was translated; `playback` records the audio outcome.
    Completed {
        translation: String,
        playback: PlaybackOutcome,
    },
}

/// The spoken half of the pipeline.
pub struct Voice<'a> {
    pub synthesizer: &'a dyn Synthesize,
    pub player: &'a dyn Play,
}

/// One linear translate-and-speak flow.
///
/// Each [`run`](Pipeline::run) call is a complete cycle: validate input,
/// translate, synthesize, play. Translation errors propagate to the
/// caller; synthesis and playback errors are captured in the outcome so
/// the translated text survives them.
pub struct Pipeline<'a> {
    translator: &'a dyn Translate,
    voice: Option<Voice<'a>>,
}

impl<'a> Pipeline<'a> {
    pub const fn new(translator: &'a dyn Translate) -> Self {
        Self {
            translator,
            voice: None,
        }
    }

    /// Enables spoken output through the given synthesizer and player.
    pub fn with_voice(mut self, synthesizer: &'a dyn Synthesize, player: &'a dyn Play) -> Self {
        self.voice = Some(Voice {
            synthesizer,
            player,
        });
        self
    }

    /// Runs one cycle for `input` against the given target language.
    pub async fn run(&self, input: &str, target: &Language) -> Result<CycleOutcome> {
        self.run_with(input, target, |_| {}).await
    }

    /// Like [`run`](Pipeline::run), but calls `on_translated` as soon as
    /// the translation is available, before any audio work starts.
    pub async fn run_with<F>(
        &self,
        input: &str,
        target: &Language,
        on_translated: F,
    ) -> Result<CycleOutcome>
    where
        F: FnOnce(&str),
    {
        let text = input.trim();
        if text.is_empty() {
            return Ok(CycleOutcome::NoInput);
        }

        let translation = self.translator.translate(text, target).await?;
        on_translated(&translation);

        let Some(voice) = &self.voice else {
            return Ok(CycleOutcome::Completed {
                translation,
                playback: PlaybackOutcome::Skipped,
            });
        };

        let playback = match voice
            .synthesizer
            .synthesize(&translation, target.speech_code)
            .await
        {
            Ok(Some(clip)) => match voice.player.play(&clip) {
                Ok(()) => PlaybackOutcome::Played,
                Err(err) => PlaybackOutcome::Failed(format!("{err:#}")),
            },
            Ok(None) => PlaybackOutcome::Skipped,
            Err(err) => PlaybackOutcome::Failed(format!("{err:#}")),
        };

        Ok(CycleOutcome::Completed {
            translation,
            playback,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::speech::AudioClip;
    use crate::translation::find_language;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingTranslator {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
        reply: String,
        fail: bool,
    }

    #[async_trait]
    impl Translate for RecordingTranslator {
        async fn translate(&self, text: &str, target: &Language) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((text.to_string(), target.name.to_string()));
            if self.fail {
                bail!("model unavailable");
            }
            Ok(self.reply.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSynthesizer {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Synthesize for RecordingSynthesizer {
        async fn synthesize(
            &self,
            text: &str,
            language_code: &str,
        ) -> anyhow::Result<Option<AudioClip>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap()
                .push((text.to_string(), language_code.to_string()));
            if self.fail {
                bail!("synthesis backend down");
            }
            Ok(Some(AudioClip::mp3(vec![0xff, 0xfb])))
        }
    }

    #[derive(Default)]
    struct RecordingPlayer {
        calls: AtomicUsize,
    }

    impl Play for RecordingPlayer {
        fn play(&self, _clip: &AudioClip) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn spanish() -> &'static Language {
        find_language("Spanish").unwrap()
    }

    #[tokio::test]
    async fn test_blank_input_invokes_nothing() {
        let translator = RecordingTranslator::default();
        let synthesizer = RecordingSynthesizer::default();
        let player = RecordingPlayer::default();
        let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);

        for input in ["", "   ", "\n\t"] {
            let outcome = pipeline.run(input, spanish()).await.unwrap();
            assert_eq!(outcome, CycleOutcome::NoInput);
        }

        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(player.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_error_propagates_before_synthesis() {
        let translator = RecordingTranslator {
            fail: true,
            ..Default::default()
        };
        let synthesizer = RecordingSynthesizer::default();
        let player = RecordingPlayer::default();
        let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);

        let result = pipeline.run("Hello", spanish()).await;
        assert!(result.is_err());
        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(player.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_synthesis_failure_keeps_translation() {
        let translator = RecordingTranslator {
            reply: "Bonjour".to_string(),
            ..Default::default()
        };
        let synthesizer = RecordingSynthesizer {
            fail: true,
            ..Default::default()
        };
        let player = RecordingPlayer::default();
        let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);

        let outcome = pipeline
            .run("Hello", find_language("French").unwrap())
            .await
            .unwrap();

        match outcome {
            CycleOutcome::Completed {
                translation,
                playback: PlaybackOutcome::Failed(reason),
            } => {
                assert_eq!(translation, "Bonjour");
                assert!(reason.contains("synthesis backend down"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(player.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_without_voice_translation_only() {
        let translator = RecordingTranslator {
            reply: "Hallo".to_string(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&translator);

        let outcome = pipeline
            .run("Hello", find_language("German").unwrap())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                translation: "Hallo".to_string(),
                playback: PlaybackOutcome::Skipped,
            }
        );
    }

    #[tokio::test]
    async fn test_full_cycle_routes_language_codes() {
        let translator = RecordingTranslator {
            reply: "Buenos días".to_string(),
            ..Default::default()
        };
        let synthesizer = RecordingSynthesizer::default();
        let player = RecordingPlayer::default();
        let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);

        let outcome = pipeline.run("Good morning", spanish()).await.unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                translation: "Buenos días".to_string(),
                playback: PlaybackOutcome::Played,
            }
        );

        let translated = translator.seen.lock().unwrap();
        assert_eq!(
            translated.as_slice(),
            &[("Good morning".to_string(), "Spanish".to_string())]
        );

        let synthesized = synthesizer.seen.lock().unwrap();
        assert_eq!(
            synthesized.as_slice(),
            &[("Buenos días".to_string(), "es".to_string())]
        );

        assert_eq!(player.calls.load(Ordering::SeqCst), 1);
    }
}
