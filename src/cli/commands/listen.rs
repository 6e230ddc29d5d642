use anyhow::Result;
use std::io::{self, Write};

use crate::config::{ConfigManager, Needs, ResolveOptions, resolve_config};
use crate::pipeline::{CycleOutcome, Pipeline, PlaybackOutcome};
use crate::speech::{AudioPlayer, RecognitionClient, SynthesisClient, capture_phrase};
use crate::translation::{TranslationClient, validate_language};
use crate::ui::{Spinner, Style};

pub struct ListenOptions {
    pub to: Option<String>,
    pub model: Option<String>,
    pub text_only: bool,
}

pub async fn run_listen(options: ListenOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();

    let resolve_options = ResolveOptions {
        to: options.to,
        model: options.model,
    };
    let needs = Needs {
        speech: !options.text_only,
        recognition: true,
    };
    let config = resolve_config(&resolve_options, &file_config, needs)?;
    let target = validate_language(&config.to)?;

    // resolve_config validated the section; guard anyway
    let Some(recognition) = config.recognition.as_ref() else {
        anyhow::bail!("Missing [recognition] service configuration");
    };
    let recognizer = RecognitionClient::new(
        recognition.endpoint.clone(),
        recognition.api_key.clone(),
        recognition.model.clone(),
    );

    crate::status!(
        "{}",
        Style::secondary("Listening... speak a phrase (up to 5 seconds)")
    );

    // Capture failures end this attempt, not the process
    let recording = match capture_phrase() {
        Ok(recording) => recording,
        Err(err) => {
            crate::warn!("{} {err:#}", Style::warning("Nothing captured:"));
            return Ok(());
        }
    };

    let spinner = Spinner::new("Transcribing...");
    let transcript = match recognizer.transcribe(recording.to_wav()?).await {
        Ok(transcript) => {
            spinner.stop();
            transcript
        }
        Err(err) => {
            spinner.stop();
            crate::warn!("{} {err:#}", Style::warning("Recognition failed:"));
            return Ok(());
        }
    };

    // An empty transcript means "no input available"; the pipeline
    // never starts
    if transcript.is_empty() {
        crate::status!(
            "{}",
            Style::secondary("No speech recognized, nothing to translate.")
        );
        return Ok(());
    }

    crate::status!("{} {}", Style::label("heard"), Style::value(&transcript));

    let translator = TranslationClient::new(
        config.translation.endpoint.clone(),
        config.translation.api_key.clone(),
        config.translation.model.clone().unwrap_or_default(),
    );

    let synthesizer = config.speech.as_ref().map(|service| {
        SynthesisClient::new(
            service.endpoint.clone(),
            service.api_key.clone(),
            service.model.clone(),
        )
    });
    let player = AudioPlayer::new();

    let mut pipeline = Pipeline::new(&translator);
    if let Some(synthesizer) = &synthesizer {
        pipeline = pipeline.with_voice(synthesizer, &player);
    }

    let spinner = Spinner::new("Translating...");

    let outcome = pipeline
        .run_with(&transcript, target, |translation| {
            spinner.stop();
            println!("{translation}");
            let _ = io::stdout().flush();
        })
        .await?;

    if let CycleOutcome::Completed {
        playback: PlaybackOutcome::Failed(reason),
        ..
    } = outcome
    {
        crate::warn!("{} {reason}", Style::error("Speech failed:"));
    }

    Ok(())
}
