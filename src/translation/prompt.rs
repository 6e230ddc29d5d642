pub const TRANSLATION_PROMPT_TEMPLATE: &str =
    "Translate the following text to {target_language}:\n\n{text}";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_translation_prompt(target_language: &str, text: &str) -> String {
    // {target_language} and {text} are placeholders for string
    // replacement, not format arguments
    TRANSLATION_PROMPT_TEMPLATE
        .replace("{target_language}", target_language)
        .replace("{text}", text)
}
