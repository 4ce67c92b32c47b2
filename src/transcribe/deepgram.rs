use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::TranscriberConfig;
use crate::error::{Result, RedubError};
use super::TranscriberTrait;

/// Prerecorded-audio response, reduced to the fields we read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenResponse {
    pub results: Option<ListenResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenResults {
    #[serde(default)]
    pub channels: Vec<ListenChannel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenChannel {
    #[serde(default)]
    pub alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenAlternative {
    #[serde(default)]
    pub transcript: String,
    pub confidence: Option<f64>,
}

impl ListenResponse {
    /// Best alternative of the first channel, trimmed; `None` when absent or blank.
    pub fn transcript(&self) -> Option<String> {
        self.results
            .as_ref()?
            .channels
            .first()?
            .alternatives
            .first()
            .map(|alt| alt.transcript.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

pub struct DeepgramTranscriber {
    client: Client,
    config: TranscriberConfig,
}

impl DeepgramTranscriber {
    pub fn new(config: TranscriberConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RedubError::Unclassified(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RedubError::ConfigurationMissing(self.config.api_key_env.clone()))
    }
}

#[async_trait]
impl TranscriberTrait for DeepgramTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        let api_key = self.api_key()?;

        info!("Transcribing {} (language hint: {})", audio_path.display(), language);

        let audio = tokio::fs::read(audio_path).await.map_err(|e| {
            RedubError::Transcription(format!("Failed to read {}: {}", audio_path.display(), e))
        })?;

        debug!("Sending {} bytes to {}", audio.len(), self.config.endpoint);

        let response = self.client
            .post(&self.config.endpoint)
            .query(&[("model", self.config.model.as_str()), ("language", language)])
            .header("Authorization", format!("Token {}", api_key))
            .header("Content-Type", "audio/wav")
            .body(audio)
            .send()
            .await
            .map_err(|e| RedubError::Transcription(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RedubError::Transcription(format!(
                "Speech-to-text API error {}: {}", status, error_text
            )));
        }

        let listen: ListenResponse = response.json().await
            .map_err(|e| RedubError::Transcription(format!("Failed to parse response: {}", e)))?;

        let transcript = listen
            .transcript()
            .ok_or_else(|| RedubError::Transcription("Empty transcript received".to_string()))?;

        info!("Transcription completed ({} chars)", transcript.chars().count());
        Ok(transcript)
    }
}
