#![allow(clippy::unwrap_used)]
//! Contract tests for the translate-and-speak pipeline.
//!
//! The remote services are replaced by in-memory doubles so the whole
//! flow can be exercised: which clients run, in what order, with which
//! arguments, and what survives a failure.

use anyhow::bail;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use parla_cli::pipeline::{CycleOutcome, Pipeline, Play, PlaybackOutcome, Synthesize, Translate};
use parla_cli::speech::AudioClip;
use parla_cli::translation::{Language, find_language};

/// Scripted translator: returns a fixed reply and records the prompt
/// inputs it saw.
struct ScriptedTranslator {
    reply: &'static str,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedTranslator {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Translate for ScriptedTranslator {
    async fn translate(&self, text: &str, target: &Language) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), target.name.to_string()));
        // Responses arrive with padding; the client contract is to trim
        Ok(self.reply.trim().to_string())
    }
}

struct ScriptedSynthesizer {
    fail: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedSynthesizer {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Synthesize for ScriptedSynthesizer {
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
            bail!("speech service unavailable");
        }
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(AudioClip::mp3(vec![0xff, 0xfb, 0x90, 0x64])))
    }
}

#[derive(Default)]
struct CountingPlayer {
    calls: AtomicUsize,
}

impl Play for CountingPlayer {
    fn play(&self, clip: &AudioClip) -> anyhow::Result<()> {
        assert!(!clip.is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn good_morning_reaches_playback_in_spanish() {
    let translator = ScriptedTranslator::new("  Buenos días \n");
    let synthesizer = ScriptedSynthesizer::new(false);
    let player = CountingPlayer::default();

    let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);
    let target = find_language("Spanish").unwrap();

    let outcome = pipeline.run("Good morning", target).await.unwrap();

    assert_eq!(
        outcome,
        CycleOutcome::Completed {
            translation: "Buenos días".to_string(),
            playback: PlaybackOutcome::Played,
        }
    );

    // The translator saw the source text and the language name
    let translated = translator.seen.lock().unwrap();
    assert_eq!(
        translated.as_slice(),
        &[("Good morning".to_string(), "Spanish".to_string())]
    );

    // The synthesizer received the translation and the speech code
    let synthesized = synthesizer.seen.lock().unwrap();
    assert_eq!(
        synthesized.as_slice(),
        &[("Buenos días".to_string(), "es".to_string())]
    );

    assert_eq!(player.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn translation_is_trimmed() {
    let translator = ScriptedTranslator::new("\n  Bonjour  ");
    let pipeline = Pipeline::new(&translator);
    let target = find_language("French").unwrap();

    let outcome = pipeline.run("Hello", target).await.unwrap();

    match outcome {
        CycleOutcome::Completed { translation, .. } => assert_eq!(translation, "Bonjour"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn blank_input_runs_no_clients() {
    let translator = ScriptedTranslator::new("unused");
    let synthesizer = ScriptedSynthesizer::new(false);
    let player = CountingPlayer::default();
    let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);
    let target = find_language("Spanish").unwrap();

    let outcome = pipeline.run("   \t\n", target).await.unwrap();

    assert_eq!(outcome, CycleOutcome::NoInput);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(player.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_synthesis_still_yields_the_translation() {
    let translator = ScriptedTranslator::new("Bonjour");
    let synthesizer = ScriptedSynthesizer::new(true);
    let player = CountingPlayer::default();
    let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);
    let target = find_language("French").unwrap();

    let outcome = pipeline.run("Hello", target).await.unwrap();

    match outcome {
        CycleOutcome::Completed {
            translation,
            playback: PlaybackOutcome::Failed(reason),
        } => {
            assert_eq!(translation, "Bonjour");
            assert!(reason.contains("speech service unavailable"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(player.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn on_translated_fires_before_audio_work() {
    struct OrderedSynthesizer {
        display_done: std::sync::Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Synthesize for OrderedSynthesizer {
        async fn synthesize(
            &self,
            _text: &str,
            _language_code: &str,
        ) -> anyhow::Result<Option<AudioClip>> {
            // The display hook must already have run
            assert_eq!(self.display_done.load(Ordering::SeqCst), 1);
            Ok(None)
        }
    }

    let display_done = std::sync::Arc::new(AtomicUsize::new(0));
    let translator = ScriptedTranslator::new("Hallo");
    let synthesizer = OrderedSynthesizer {
        display_done: display_done.clone(),
    };
    let player = CountingPlayer::default();
    let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);
    let target = find_language("German").unwrap();

    let outcome = pipeline
        .run_with("Hello", target, |translation| {
            assert_eq!(translation, "Hallo");
            display_done.fetch_add(1, Ordering::SeqCst);
        })
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
async fn every_supported_language_routes_its_speech_code() {
    for language in parla_cli::translation::SUPPORTED_LANGUAGES {
        let translator = ScriptedTranslator::new("ok");
        let synthesizer = ScriptedSynthesizer::new(false);
        let player = CountingPlayer::default();
        let pipeline = Pipeline::new(&translator).with_voice(&synthesizer, &player);

        pipeline.run("hello", language).await.unwrap();

        let synthesized = synthesizer.seen.lock().unwrap();
        assert_eq!(synthesized[0].1, language.speech_code);
    }
}
