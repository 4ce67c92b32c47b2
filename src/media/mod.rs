// Media processing over an external ffmpeg binary
//
// - Commands: argument builders for each ffmpeg invocation
// - Processor: trait implementation that runs them

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::MediaConfig;
use crate::error::Result;

/// Media operations the dubbing pipeline depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProcessorTrait: Send + Sync {
    /// Demux the audio track of a video into a PCM wave file
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()>;

    /// Combine the video stream of `video_path` with the audio of `speech_path`
    async fn replace_audio(
        &self,
        video_path: &Path,
        speech_path: &Path,
        output_path: &Path,
    ) -> Result<()>;

    /// Verify the binary runs; returns its version banner
    async fn check_availability(&self) -> Result<String>;
}

pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default media processor implementation (FFmpeg-based)
    pub fn create_processor(config: MediaConfig) -> Box<dyn MediaProcessorTrait> {
        Box::new(processor::MediaProcessorImpl::new(config))
    }
}
