use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for a remote speech-recognition service.
///
/// Submits captured audio as a WAV upload and returns the best-effort
/// transcription. An empty transcription is a valid result (the service
/// heard nothing intelligible); transport and API failures are errors.
pub struct RecognitionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl RecognitionClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    /// Transcribes a WAV-encoded recording.
    pub async fn transcribe(&self, wav_data: Vec<u8>) -> Result<String> {
        let url = format!(
            "{}/v1/audio/transcriptions",
            self.endpoint.trim_end_matches('/')
        );

        let file_part = Part::bytes(wav_data)
            .file_name("phrase.wav")
            .mime_str("audio/wav")
            .context("Failed to build audio upload")?;

        let mut form = Form::new().part("file", file_part);

        if let Some(model) = &self.model {
            form = form.text("model", model.clone());
        }

        let mut http_request = self.client.post(&url).multipart(form);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to recognition endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Recognition request failed with status {status}: {body}");
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .context("Failed to parse recognition response")?;

        Ok(transcription.text.trim().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transcription_response_parses() {
        let raw = r#"{"text":"  good morning \n"}"#;
        let response: TranscriptionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text.trim(), "good morning");
    }

    #[test]
    fn test_empty_transcription_is_valid() {
        let raw = r#"{"text":""}"#;
        let response: TranscriptionResponse = serde_json::from_str(raw).unwrap();
        assert!(response.text.is_empty());
    }
}
