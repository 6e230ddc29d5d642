use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::prompt::build_translation_prompt;
use crate::pipeline::Translate;
use crate::translation::Language;

/// Fixed sampling temperature for translation requests.
const TEMPERATURE: f32 = 0.3;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// One request per translation, no streaming, no retries. Failures
/// propagate to the caller, which is responsible for reporting them.
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl TranslationClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translates `text` into the named target language.
    ///
    /// Sends a single user-role message containing the templated prompt
    /// and returns the response content with surrounding whitespace
    /// stripped.
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let prompt = build_translation_prompt(target_language, text);

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: Cow::Owned(prompt),
            }],
            temperature: TEMPERATURE,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to translation endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Translation request failed with status {status}: {body}");
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Translation response contained no content")?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl Translate for TranslationClient {
    async fn translate(&self, text: &str, target: &Language) -> Result<String> {
        self.translate_text(text, target.name).await
    }
}
