// Text translation over a hosted machine-translation service

pub mod libre;

use async_trait::async_trait;

pub use libre::LibreTranslator;

use crate::config::TranslateConfig;
use crate::error::Result;

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate plain text from `source_language` to `target_language`
    async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;
}

pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create_translator(config: TranslateConfig) -> Result<Box<dyn Translator>> {
        Ok(Box::new(LibreTranslator::new(config)?))
    }
}
