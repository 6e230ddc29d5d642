mod client;
mod language;
mod prompt;

pub use client::TranslationClient;
pub use language::{
    DEFAULT_SPEECH_CODE, Language, SUPPORTED_LANGUAGES, find_language, print_languages,
    speech_code_for, validate_language,
};
pub use prompt::build_translation_prompt;
