use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::SynthesisConfig;
use crate::error::{Result, RedubError};
use super::SynthesizerTrait;

/// Runs a TTS command line such as `gtts-cli --lang hi --output out.mp3 "text"`.
pub struct CommandSynthesizer {
    config: SynthesisConfig,
}

impl CommandSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Substitute `{text}`, `{lang}` and `{output}` in the argument template.
    pub fn build_args(&self, text: &str, language: &str, output_path: &Path) -> Vec<String> {
        let output = output_path.to_string_lossy();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace("{output}", &output)
                    .replace("{lang}", language)
                    .replace("{text}", text)
            })
            .collect()
    }
}

#[async_trait]
impl SynthesizerTrait for CommandSynthesizer {
    async fn synthesize(&self, text: &str, language: &str, output_path: &Path) -> Result<()> {
        info!("Synthesizing speech ({}) -> {}", language, output_path.display());

        let args = self.build_args(text, language, output_path);
        debug!("Executing TTS command: {} {:?}", self.config.binary_path, args);

        let output = Command::new(&self.config.binary_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| RedubError::Synthesis(format!("Failed to execute {}: {}", self.config.binary_path, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", self.config.binary_path, output.status),
                detail => detail.to_string(),
            };
            return Err(RedubError::Synthesis(message));
        }

        match tokio::fs::metadata(output_path).await {
            Ok(meta) if meta.len() > 0 => {
                info!("Speech synthesis completed ({} bytes)", meta.len());
                Ok(())
            }
            _ => Err(RedubError::Synthesis(format!(
                "{} produced no audio at {}",
                self.config.binary_path,
                output_path.display()
            ))),
        }
    }
}
