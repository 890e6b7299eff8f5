// Transcription demo client
//
// Disconnected from the map runtime: uploads an audio clip to the speech
// backend and returns the transcript. Kept as a demo surface only.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ClientError, Result};

// Whisper on the backend can chew for a while on longer clips.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    transcription: Option<String>,
}

/// Client for the `POST /api/transcribe` demo endpoint.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    client: Client,
    base_url: String,
}

impl TranscriptionClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload an audio clip and return its transcript.
    pub async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String> {
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| ClientError::body("transcribe", e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("transcribe", response.status()));
        }

        let body: TranscriptionResponse = response.json().await?;
        body.transcription
            .ok_or_else(|| ClientError::body("transcribe", "no transcription in response"))
    }
}
