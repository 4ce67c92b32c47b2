// Text-to-speech through an external engine

pub mod command;

use async_trait::async_trait;
use std::path::Path;

pub use command::CommandSynthesizer;

use crate::config::SynthesisConfig;
use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SynthesizerTrait: Send + Sync {
    /// Speak `text` in `language`, writing compressed audio to `output_path`
    async fn synthesize(&self, text: &str, language: &str, output_path: &Path) -> Result<()>;
}

pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create_synthesizer(config: SynthesisConfig) -> Box<dyn SynthesizerTrait> {
        Box::new(CommandSynthesizer::new(config))
    }
}
