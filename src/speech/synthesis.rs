use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::AudioClip;
use crate::pipeline::Synthesize;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    input: &'a str,
    language: &'a str,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Client for a remote speech-synthesis service.
///
/// Returns MP3 audio as an in-memory clip. Empty input is a no-op and
/// never reaches the network; remote failures are errors for the caller
/// to report.
pub struct SynthesisClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl SynthesisClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    /// Synthesizes `text` in the voice selected by `language_code`.
    ///
    /// Returns `None` for empty or whitespace-only text without
    /// contacting the service.
    pub async fn synthesize_speech(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Option<AudioClip>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let url = format!("{}/v1/audio/speech", self.endpoint.trim_end_matches('/'));

        let speech_request = SpeechRequest {
            input: text,
            language: language_code,
            response_format: "mp3",
            model: self.model.as_deref(),
        };

        let mut http_request = self.client.post(&url).json(&speech_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to speech endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Speech request failed with status {status}: {body}");
        }

        let audio = response
            .bytes()
            .await
            .context("Failed to read synthesized audio")?;

        Ok(Some(AudioClip::mp3(audio.to_vec())))
    }
}

#[async_trait]
impl Synthesize for SynthesisClient {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Option<AudioClip>> {
        self.synthesize_speech(text, language_code).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_request_serializes() {
        let request = SpeechRequest {
            input: "Buenos días",
            language: "es",
            response_format: "mp3",
            model: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"], "Buenos días");
        assert_eq!(json["language"], "es");
        assert_eq!(json["response_format"], "mp3");
        assert!(json.get("model").is_none());
    }

    #[tokio::test]
    async fn test_empty_text_skips_the_service() {
        // The endpoint is unroutable; a request would fail loudly
        let client = SynthesisClient::new("http://127.0.0.1:1".to_string(), None, None);

        let result = client.synthesize_speech("", "es").await.unwrap();
        assert!(result.is_none());

        let result = client.synthesize_speech("   \n", "fr").await.unwrap();
        assert!(result.is_none());
    }
}
