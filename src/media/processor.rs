use async_trait::async_trait;
use std::path::Path;
use tracing::{info, debug};

use crate::config::MediaConfig;
use crate::error::Result;
use super::{MediaProcessorTrait, MediaCommandBuilder};

/// FFmpeg-backed media processor
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        info!("Extracting audio from {} to {}", video_path.display(), audio_path.display());

        let command = self.command_builder.extract_audio(
            video_path,
            audio_path,
            self.config.extract_sample_rate,
            self.config.extract_channels,
        );
        command.execute().await?;

        info!("Audio extraction completed");
        Ok(())
    }

    async fn replace_audio(
        &self,
        video_path: &Path,
        speech_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!("Replacing audio of {} with {} -> {}",
              video_path.display(), speech_path.display(), output_path.display());

        // WebM only carries Opus/Vorbis audio
        let audio_codec = match output_path.extension().and_then(|e| e.to_str()) {
            Some("webm") => "libopus",
            _ => self.config.remux_audio_codec.as_str(),
        };

        let command = self.command_builder.replace_audio(
            video_path,
            speech_path,
            output_path,
            audio_codec,
        );
        command.execute().await?;

        info!("Remux completed successfully");
        Ok(())
    }

    async fn check_availability(&self) -> Result<String> {
        debug!("Checking media processor at {}", self.config.binary_path);

        let stdout = self.command_builder.version_check().execute().await?;
        // First line carries the version banner
        let version = stdout.lines().next().unwrap_or("Unknown version").to_string();

        info!("Media processor is available: {}", version);
        Ok(version)
    }
}
