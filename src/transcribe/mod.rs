// Speech-to-text over a hosted recognition service
//
// The pipeline only needs the recognized text. Service-specific response
// shapes live next to their client and never leak past this module.

pub mod deepgram;

use async_trait::async_trait;
use std::path::Path;

pub use deepgram::DeepgramTranscriber;

use crate::config::TranscriberConfig;
use crate::error::Result;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Recognize the speech in a wave file; `language` is a hint, not a detection result
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String>;
}

pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Build the default client. The key is checked by the caller before any job runs.
    pub fn create_transcriber(config: TranscriberConfig) -> Result<Box<dyn TranscriberTrait>> {
        Ok(Box::new(DeepgramTranscriber::new(config)?))
    }
}
