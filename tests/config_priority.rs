#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file
//! settings. Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use parla_cli::config::{
    ConfigFile, DEFAULT_TRANSLATION_MODEL, Needs, ParlaConfig, ResolveOptions, ServiceConfig,
    resolve_config,
};

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        parla: ParlaConfig {
            to: Some("Spanish".to_string()),
        },
        translation: Some(ServiceConfig {
            endpoint: "http://translation.local".to_string(),
            api_key: None,
            api_key_env: None,
            model: Some("config-model".to_string()),
        }),
        speech: Some(ServiceConfig {
            endpoint: "http://speech.local".to_string(),
            api_key: None,
            api_key_env: None,
            model: None,
        }),
        recognition: Some(ServiceConfig {
            endpoint: "http://recognition.local".to_string(),
            api_key: None,
            api_key_env: None,
            model: Some("whisper-1".to_string()),
        }),
    }
}

#[test]
fn cli_target_language_overrides_config_file() {
    let options = ResolveOptions {
        to: Some("Japanese".to_string()),
        model: None,
    };

    let resolved =
        resolve_config(&options, &make_config_with_defaults(), Needs::default()).unwrap();

    assert_eq!(resolved.to, "Japanese");
}

#[test]
fn cli_model_overrides_config_file() {
    let options = ResolveOptions {
        to: None,
        model: Some("cli-model".to_string()),
    };

    let resolved =
        resolve_config(&options, &make_config_with_defaults(), Needs::default()).unwrap();

    assert_eq!(resolved.translation.model.as_deref(), Some("cli-model"));
}

#[test]
fn config_file_values_apply_without_cli_options() {
    let resolved = resolve_config(
        &ResolveOptions::default(),
        &make_config_with_defaults(),
        Needs::default(),
    )
    .unwrap();

    assert_eq!(resolved.to, "Spanish");
    assert_eq!(resolved.translation.model.as_deref(), Some("config-model"));
    assert_eq!(resolved.translation.endpoint, "http://translation.local");
}

#[test]
fn built_in_model_applies_when_nothing_is_configured() {
    let mut config = make_config_with_defaults();
    if let Some(translation) = config.translation.as_mut() {
        translation.model = None;
    }

    let resolved = resolve_config(&ResolveOptions::default(), &config, Needs::default()).unwrap();

    assert_eq!(
        resolved.translation.model.as_deref(),
        Some(DEFAULT_TRANSLATION_MODEL)
    );
}

#[test]
fn services_resolve_only_when_needed() {
    let needs = Needs {
        speech: true,
        recognition: true,
    };

    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults(), needs)
        .unwrap();

    assert_eq!(
        resolved.speech.as_ref().map(|s| s.endpoint.as_str()),
        Some("http://speech.local")
    );
    assert_eq!(
        resolved.recognition.as_ref().map(|s| s.model.as_deref()),
        Some(Some("whisper-1"))
    );

    let resolved = resolve_config(
        &ResolveOptions::default(),
        &make_config_with_defaults(),
        Needs::default(),
    )
    .unwrap();

    assert!(resolved.speech.is_none());
    assert!(resolved.recognition.is_none());
}
