use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, Write};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::config::ResolvedService;
use crate::pipeline::{CycleOutcome, Pipeline, PlaybackOutcome};
use crate::speech::{AudioPlayer, SynthesisClient};
use crate::translation::{Language, TranslationClient, validate_language};
use crate::ui::{Spinner, Style};

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The target language.
    pub target: &'static Language,
    /// The translation model.
    pub model: String,
    /// The translation service.
    pub translation: ResolvedService,
    /// The speech service, when spoken output is enabled.
    pub speech: Option<ResolvedService>,
}

impl SessionConfig {
    /// Creates a new session configuration.
    pub const fn new(
        target: &'static Language,
        model: String,
        translation: ResolvedService,
        speech: Option<ResolvedService>,
    ) -> Self {
        Self {
            target,
            model,
            translation,
            speech,
        }
    }
}

/// An interactive translate-and-speak session.
///
/// Provides a REPL-style interface; every submitted line runs one full
/// cycle. Failures are reported and the prompt comes back.
pub struct ChatSession {
    config: SessionConfig,
    translator: TranslationClient,
    synthesizer: Option<SynthesisClient>,
    player: AudioPlayer,
}

impl ChatSession {
    /// Creates a new chat session with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        let translator = TranslationClient::new(
            config.translation.endpoint.clone(),
            config.translation.api_key.clone(),
            config.model.clone(),
        );

        let synthesizer = config.speech.as_ref().map(|service| {
            SynthesisClient::new(
                service.endpoint.clone(),
                service.api_key.clone(),
                service.model.clone(),
            )
        });

        Self {
            config,
            translator,
            synthesizer,
            player: AudioPlayer::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();

        if self.synthesizer.is_none() {
            println!(
                "{}",
                Style::secondary("No [speech] service configured; running text-only.")
            );
            println!();
        }

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type text to translate, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        // A failed cycle never ends the session
                        if let Err(err) = self.translate_and_speak(&text).await {
                            ui::print_error(&format!("{err:#}"));
                        }
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&self.config);
                true
            }
            SlashCommand::Help => {
                ui::print_help();
                true
            }
            SlashCommand::Quit => false,
            SlashCommand::Set { key, value } => {
                self.handle_set(&key, value.as_deref());
                true
            }
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
                true
            }
        }
    }

    fn handle_set(&mut self, key: &str, value: Option<&str>) {
        match key {
            "to" => self.set_target(value),
            "model" => self.set_model(value),
            "" => {
                println!("Usage: /set <key> <value>");
                println!("Keys: to, model");
            }
            _ => {
                ui::print_error(&format!("Unknown setting: {key}"));
                println!("Available: to, model");
            }
        }
    }

    fn set_target(&mut self, value: Option<&str>) {
        let Some(name) = value else {
            ui::print_error("Usage: /set to <language>");
            return;
        };

        match validate_language(name) {
            Ok(language) => {
                self.config.target = language;
                println!(
                    "{} Target language set to {}",
                    Style::success("✓"),
                    Style::value(language.name)
                );
            }
            Err(err) => ui::print_error(&err.to_string()),
        }
    }

    fn set_model(&mut self, value: Option<&str>) {
        match value {
            None => {
                ui::print_error("Usage: /set model <name>");
            }
            Some(model) => {
                self.config.model = model.to_string();
                self.translator = TranslationClient::new(
                    self.config.translation.endpoint.clone(),
                    self.config.translation.api_key.clone(),
                    self.config.model.clone(),
                );
                println!(
                    "{} Model set to {}",
                    Style::success("✓"),
                    Style::value(model)
                );
            }
        }
    }

    async fn translate_and_speak(&self, text: &str) -> Result<()> {
        let mut pipeline = Pipeline::new(&self.translator);
        if let Some(synthesizer) = &self.synthesizer {
            pipeline = pipeline.with_voice(synthesizer, &self.player);
        }

        let spinner = Spinner::new("Translating...");

        let outcome = pipeline
            .run_with(text, self.config.target, |translation| {
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
            ui::print_error(&reason);
        }

        println!();
        Ok(())
    }
}
