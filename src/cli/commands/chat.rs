use anyhow::Result;

use crate::chat::{ChatSession, SessionConfig};
use crate::config::{ConfigManager, Needs, ResolveOptions, resolve_config};
use crate::translation::validate_language;

pub struct ChatOptions {
    pub to: Option<String>,
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();

    let resolve_options = ResolveOptions {
        to: options.to,
        model: options.model,
    };
    // Chat speaks when a speech service is configured and stays
    // text-only otherwise
    let needs = Needs {
        speech: file_config.speech.is_some(),
        recognition: false,
    };
    let config = resolve_config(&resolve_options, &file_config, needs)?;
    let target = validate_language(&config.to)?;

    let model = config.translation.model.clone().unwrap_or_default();
    let session_config = SessionConfig::new(target, model, config.translation, config.speech);

    ChatSession::new(session_config).run().await
}
