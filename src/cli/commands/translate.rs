use anyhow::Result;
use std::io::{self, Write};

use crate::config::{ConfigManager, Needs, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::pipeline::{CycleOutcome, Pipeline, PlaybackOutcome};
use crate::speech::{AudioPlayer, SynthesisClient};
use crate::translation::{TranslationClient, validate_language};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<String>,
    pub to: Option<String>,
    pub model: Option<String>,
    pub text_only: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let source_text = InputReader::read(options.file.as_deref())?;

    // Blank input never starts the pipeline
    if source_text.trim().is_empty() {
        crate::warn!(
            "{} Please enter text to translate.",
            Style::warning("Warning:")
        );
        return Ok(());
    }

    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();

    let resolve_options = ResolveOptions {
        to: options.to,
        model: options.model,
    };
    let needs = Needs {
        speech: !options.text_only,
        recognition: false,
    };
    let config = resolve_config(&resolve_options, &file_config, needs)?;
    let target = validate_language(&config.to)?;

    let translator = TranslationClient::new(
        config.translation.endpoint.clone(),
        config.translation.api_key.clone(),
        config.translation.model.clone().unwrap_or_default(),
    );

    let synthesizer = config
        .speech
        .as_ref()
        .map(|service| {
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
        .run_with(&source_text, target, |translation| {
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
