use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, RedubError};

/// Which pipeline stage a media command belongs to; decides the error tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStage {
    Extraction,
    Remux,
    Utility,
}

impl MediaStage {
    fn error(self, message: String) -> RedubError {
        match self {
            Self::Extraction => RedubError::MediaExtraction(message),
            Self::Remux => RedubError::Remux(message),
            Self::Utility => RedubError::Unclassified(message),
        }
    }
}

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
    pub stage: MediaStage,
}

impl MediaCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        binary_path: S1,
        description: S2,
        stage: MediaStage,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
            stage,
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Copy video stream
    pub fn copy_video(self) -> Self {
        self.video_codec("copy")
    }

    pub fn no_video(self) -> Self {
        self.arg("-vn")
    }

    pub fn audio_sample_rate(self, rate: u32) -> Self {
        self.arg("-ar").arg(rate.to_string())
    }

    pub fn audio_channels(self, channels: u32) -> Self {
        self.arg("-ac").arg(channels.to_string())
    }

    /// Select a stream, e.g. `0:v:0`
    pub fn map<S: Into<String>>(self, specifier: S) -> Self {
        self.arg("-map").arg(specifier)
    }

    /// Stop at the end of the shortest input stream
    pub fn shortest(self) -> Self {
        self.arg("-shortest")
    }

    /// Execute the command, returning captured stdout on success.
    pub async fn execute(&self) -> Result<String> {
        debug!("Executing media processing command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                self.stage
                    .error(format!("Failed to execute media processor: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.stage.error(format!(
                "{} failed: {}",
                self.description,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Builder for the media operations the pipeline needs
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Demux the audio track into an uncompressed PCM waveform.
    pub fn extract_audio<P: AsRef<Path>>(
        &self,
        video_path: P,
        audio_path: P,
        sample_rate: Option<u32>,
        channels: Option<u32>,
    ) -> MediaCommand {
        let mut cmd = MediaCommand::new(&self.binary_path, "Audio extraction", MediaStage::Extraction)
            .overwrite()
            .input(video_path)
            .no_video()
            .audio_codec("pcm_s16le");

        if let Some(rate) = sample_rate {
            cmd = cmd.audio_sample_rate(rate);
        }
        if let Some(channels) = channels {
            cmd = cmd.audio_channels(channels);
        }

        cmd.output(audio_path)
    }

    /// Video from the first input (stream copy), audio from the second,
    /// cut at the shorter of the two.
    pub fn replace_audio<P: AsRef<Path>>(
        &self,
        video_path: P,
        speech_path: P,
        output_path: P,
        audio_codec: &str,
    ) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Audio replacement", MediaStage::Remux)
            .overwrite()
            .input(video_path)
            .input(speech_path)
            .map("0:v:0")
            .map("1:a:0")
            .copy_video()
            .audio_codec(audio_codec)
            .shortest()
            .output(output_path)
    }

    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check", MediaStage::Utility)
            .arg("-version")
    }
}
