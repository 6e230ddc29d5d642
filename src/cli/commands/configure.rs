//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{ConfigManager, DEFAULT_TRANSLATION_MODEL};
use crate::translation::SUPPORTED_LANGUAGES;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `--show`, prints the current configuration. Otherwise the user
/// interactively sets the default target language and translation model.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        return print_configuration();
    }
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default();

    // Services cannot be set up interactively; they carry endpoints
    // and key references better kept in the file
    if config.translation.is_none() {
        bail!(
            "No [translation] service configured.\n\n\
             Add one to {} first:\n  \
             [translation]\n  \
             endpoint = \"https://api.example.com\"\n  \
             api_key_env = \"PARLA_TRANSLATION_API_KEY\"",
            manager.config_path().display()
        );
    }

    print_current_defaults(&config.parla.to, config.translation.as_ref().and_then(|s| s.model.as_deref()));

    let to = select_target_language(config.parla.to.as_deref())?;

    let current_model = config
        .translation
        .as_ref()
        .and_then(|service| service.model.as_deref())
        .unwrap_or(DEFAULT_TRANSLATION_MODEL);
    let model = prompt_model(current_model)?;

    config.parla.to = Some(to);
    if let Some(service) = config.translation.as_mut() {
        service.model = Some(model);
    }

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_configuration() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default();

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}           {}",
        Style::label("to"),
        config
            .parla
            .to
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );

    for (name, service) in [
        ("translation", config.translation.as_ref()),
        ("speech", config.speech.as_ref()),
        ("recognition", config.recognition.as_ref()),
    ] {
        match service {
            Some(service) => {
                println!(
                    "  {:12} {}",
                    Style::label(name),
                    Style::secondary(&service.endpoint)
                );
                if let Some(model) = &service.model {
                    println!("  {:12} {}", Style::label(""), Style::value(model));
                }
                if service.requires_api_key() {
                    let has_key = service.get_api_key().is_some();
                    println!(
                        "  {:12} api key {}",
                        Style::label(""),
                        if has_key {
                            Style::success("(set)")
                        } else {
                            Style::error("(not set)")
                        }
                    );
                }
            }
            None => {
                println!(
                    "  {:12} {}",
                    Style::label(name),
                    Style::secondary("(not configured)")
                );
            }
        }
    }

    println!();
    println!(
        "{}",
        Style::secondary(format!("File: {}", manager.config_path().display()))
    );

    Ok(())
}

fn print_current_defaults(to: &Option<String>, model: Option<&str>) {
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}     {}",
        Style::label("to"),
        to.as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("model"),
        model.map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!();
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| lang.name.to_string())
        .collect();

    let default_index = default
        .and_then(|d| {
            SUPPORTED_LANGUAGES
                .iter()
                .position(|lang| lang.name.eq_ignore_ascii_case(d))
        })
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn prompt_model(current: &str) -> Result<String> {
    let model = Text::new("Translation model:")
        .with_default(current)
        .with_help_message("Enter the model name")
        .prompt()?;

    if model.trim().is_empty() {
        bail!("Model name cannot be empty");
    }

    Ok(model.trim().to_string())
}
