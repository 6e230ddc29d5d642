//! The fixed set of target languages and their speech-synthesis codes.

use anyhow::Result;

use crate::ui::Style;

/// A target language offered by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Human-readable name, as shown to the user and sent to the model.
    pub name: &'static str,
    /// Short code understood by the speech-synthesis service.
    pub speech_code: &'static str,
}

/// Fallback speech code for names outside the table.
///
/// Unreachable through the CLI (language names are validated first),
/// but kept so an unknown name degrades to English pronunciation
/// instead of a hard failure.
pub const DEFAULT_SPEECH_CODE: &str = "en";

/// The supported target languages.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { name: "Spanish", speech_code: "es" },
    Language { name: "French", speech_code: "fr" },
    Language { name: "German", speech_code: "de" },
    Language { name: "Chinese", speech_code: "zh-cn" },
    Language { name: "Arabic", speech_code: "ar" },
    Language { name: "Urdu", speech_code: "ur" },
    Language { name: "Japanese", speech_code: "ja" },
    Language { name: "Russian", speech_code: "ru" },
    Language { name: "Hindi", speech_code: "hi" },
    Language { name: "Italian", speech_code: "it" },
];

/// Looks up a language by display name (case-insensitive) or speech code.
pub fn find_language(name: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.name.eq_ignore_ascii_case(name) || lang.speech_code == name)
}

/// Returns the speech code for a language name, or [`DEFAULT_SPEECH_CODE`]
/// when the name is not in the table.
pub fn speech_code_for(name: &str) -> &'static str {
    find_language(name).map_or(DEFAULT_SPEECH_CODE, |lang| lang.speech_code)
}

/// Prints all supported target languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported target languages"));
    for lang in SUPPORTED_LANGUAGES {
        println!(
            "  {:10} {}",
            Style::value(lang.name),
            Style::code(lang.speech_code)
        );
    }
}

/// Validates that the given name is a supported target language.
///
/// # Errors
///
/// Returns an error if the name is not in the supported list.
pub fn validate_language(name: &str) -> Result<&'static Language> {
    find_language(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unsupported target language: '{name}'\n\n\
             Supported languages: Spanish, French, German, Chinese, Arabic, \
             Urdu, Japanese, Russian, Hindi, Italian\n\
             Run 'parla languages' to see them with their speech codes."
        )
    })
}
