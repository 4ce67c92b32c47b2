use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::TranslateConfig;
use crate::error::{Result, RedubError};
use super::Translator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}

pub struct LibreTranslator {
    client: Client,
    config: TranslateConfig,
}

impl LibreTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RedubError::Unclassified(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        info!("Translating {} chars {} -> {}", text.chars().count(), source_language, target_language);

        let request = TranslationRequest {
            q: text.to_string(),
            source: source_language.to_string(),
            target: target_language.to_string(),
            format: "text".to_string(),
            api_key: self.config.api_key.clone(),
        };

        debug!("Sending translation request to: {}", self.config.endpoint);

        let response = self.client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RedubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RedubError::Translation(format!(
                "Translation API error {}: {}", status, error_text
            )));
        }

        let translation: TranslationResponse = response.json().await
            .map_err(|e| RedubError::Translation(format!("Failed to parse response: {}", e)))?;

        let translated = translation
            .translated_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RedubError::Translation("Empty translation received".to_string()))?;

        debug!("Translated text: {}", translated);
        Ok(translated)
    }
}
