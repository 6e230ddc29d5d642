use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

/// Model used for translation when none is configured.
///
/// Pinned to a flash-tier model; override via config or `--model`.
pub const DEFAULT_TRANSLATION_MODEL: &str = "gemini-1.5-flash-latest";

/// Default settings in the `[parla]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParlaConfig {
    /// Default target language name (one of the supported set).
    pub to: Option<String>,
}

/// Configuration for one remote service.
///
/// The same shape serves translation, speech synthesis, and speech
/// recognition; each gets its own section in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// The service endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Model name passed to the service, where it takes one.
    #[serde(default)]
    pub model: Option<String>,
}

impl ServiceConfig {
    /// Gets the API key, preferring environment variable over config file.
    ///
    /// Empty values are treated as unset; a key is either present and
    /// non-empty or absent.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }

    /// Returns `true` if this service declares an API key requirement.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/parla/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub parla: ParlaConfig,
    /// Translation service (chat completions). Always required to run.
    #[serde(default)]
    pub translation: Option<ServiceConfig>,
    /// Speech-synthesis service. Required unless running text-only.
    #[serde(default)]
    pub speech: Option<ServiceConfig>,
    /// Speech-recognition service. Required for `listen`.
    #[serde(default)]
    pub recognition: Option<ServiceConfig>,
}

/// One remote service after key resolution and validation.
#[derive(Debug, Clone)]
pub struct ResolvedService {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The target language name.
    pub to: String,
    pub translation: ResolvedService,
    pub speech: Option<ResolvedService>,
    pub recognition: Option<ResolvedService>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target language name override.
    pub to: Option<String>,
    /// Translation model override.
    pub model: Option<String>,
}

/// Which services the invoked command actually uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Needs {
    pub speech: bool,
    pub recognition: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values. Services the
/// command needs are validated here, at startup: a missing section or a
/// declared-but-empty API key fails before any pipeline work starts.
///
/// # Errors
///
/// Returns an error if the target language or a needed service section
/// is missing, or if a required API key resolves to nothing.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    needs: Needs,
) -> Result<ResolvedConfig> {
    let to = options
        .to
        .as_ref()
        .or(config_file.parla.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: parla --to <language>\n  \
                 - Config file: ~/.config/parla/config.toml"
            )
        })?;

    let translation_config = config_file.translation.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "Missing [translation] service configuration\n\n\
             Add it to ~/.config/parla/config.toml:\n  \
             [translation]\n  \
             endpoint = \"https://api.example.com\"\n  \
             api_key_env = \"PARLA_TRANSLATION_API_KEY\""
        )
    })?;

    let mut translation = resolve_service("translation", translation_config)?;
    translation.model = options
        .model
        .clone()
        .or(translation.model)
        .or_else(|| Some(DEFAULT_TRANSLATION_MODEL.to_string()));

    let speech = if needs.speech {
        let service = config_file.speech.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Missing [speech] service configuration\n\n\
                 Add it to ~/.config/parla/config.toml, or pass --text-only \
                 to skip spoken output."
            )
        })?;
        Some(resolve_service("speech", service)?)
    } else {
        None
    };

    let recognition = if needs.recognition {
        let service = config_file.recognition.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Missing [recognition] service configuration\n\n\
                 Add it to ~/.config/parla/config.toml:\n  \
                 [recognition]\n  \
                 endpoint = \"https://stt.example.com\""
            )
        })?;
        Some(resolve_service("recognition", service)?)
    } else {
        None
    };

    Ok(ResolvedConfig {
        to,
        translation,
        speech,
        recognition,
    })
}

fn resolve_service(name: &str, service: &ServiceConfig) -> Result<ResolvedService> {
    if service.endpoint.trim().is_empty() {
        bail!("Service [{name}] has an empty endpoint in ~/.config/parla/config.toml");
    }

    let api_key = service.get_api_key();

    if service.requires_api_key() && api_key.is_none() {
        let env_var = service.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Service [{name}] requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/parla/config.toml"
        );
    }

    Ok(ResolvedService {
        endpoint: service.endpoint.clone(),
        api_key,
        model: service.model.clone(),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/parla/config.toml`
    /// or `~/.config/parla/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }
}
