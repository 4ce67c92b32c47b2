use base64::{Engine as _, engine::general_purpose};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, RedubError};
use crate::job::{Job, JobState};
use crate::language::{LanguagePair, language_name};
use crate::media::{MediaProcessorTrait, MediaProcessorFactory};
use crate::synthesize::{SynthesizerTrait, SynthesizerFactory};
use crate::transcribe::{TranscriberTrait, TranscriberFactory};
use crate::translate::{Translator, TranslatorFactory};
use crate::workspace::Workspace;

const DEFAULT_CONTAINER: &str = "mp4";

/// Containers ffmpeg can remux into by extension; anything else is written as MP4.
const SUPPORTED_CONTAINERS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm", "avi"];

/// One dubbing request as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct JobRequest {
    pub video: Option<Vec<u8>>,
    /// Original upload name; only its extension is used
    pub file_name: Option<String>,
    pub target_language: Option<String>,
    pub source_language: Option<String>,
}

impl JobRequest {
    pub fn new(video: Vec<u8>) -> Self {
        Self {
            video: Some(video),
            ..Self::default()
        }
    }

    pub fn with_file_name<S: Into<String>>(mut self, file_name: S) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_target<S: Into<String>>(mut self, language: S) -> Self {
        self.target_language = Some(language.into());
        self
    }

    pub fn with_source<S: Into<String>>(mut self, language: S) -> Self {
        self.source_language = Some(language.into());
        self
    }
}

/// Final video of a completed job, held in memory.
#[derive(Debug, Clone)]
pub struct DubbedVideo {
    pub job_id: Uuid,
    pub languages: LanguagePair,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DubbedVideo {
    /// Self-contained `data:` URL for the video
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

pub struct Workflow {
    config: Config,
    media: Box<dyn MediaProcessorTrait>,
    transcriber: Box<dyn TranscriberTrait>,
    translator: Box<dyn Translator>,
    synthesizer: Box<dyn SynthesizerTrait>,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let media = MediaProcessorFactory::create_processor(config.media.clone());
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber.clone())?;
        let translator = TranslatorFactory::create_translator(config.translate.clone())?;
        let synthesizer = SynthesizerFactory::create_synthesizer(config.synthesis.clone());

        Ok(Self::with_components(config, media, transcriber, translator, synthesizer))
    }

    pub fn with_components(
        config: Config,
        media: Box<dyn MediaProcessorTrait>,
        transcriber: Box<dyn TranscriberTrait>,
        translator: Box<dyn Translator>,
        synthesizer: Box<dyn SynthesizerTrait>,
    ) -> Self {
        Self {
            config,
            media,
            transcriber,
            translator,
            synthesizer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Verify the media tool runs and the credential is present.
    pub async fn check_dependencies(&self) -> Result<String> {
        self.config.require_transcriber_key()?;
        self.media.check_availability().await
    }

    /// Replace the spoken audio of a video with speech in the target language.
    pub async fn translate(&self, request: JobRequest) -> Result<DubbedVideo> {
        let video = request
            .video
            .filter(|bytes| !bytes.is_empty())
            .ok_or(RedubError::InputMissing)?;
        self.config.require_transcriber_key()?;
        let languages = LanguagePair::resolve(
            &self.config.languages,
            request.target_language.as_deref(),
            request.source_language.as_deref(),
        )?;
        let extension = container_extension(request.file_name.as_deref());

        let mut job = Job::new();
        info!("Job {}: dubbing {} bytes of .{} from {} to {}",
              job.id, video.len(), extension,
              language_name(&languages.source), language_name(&languages.target));

        let workspace = Workspace::create(&self.config.workspace)?;
        let outcome = self
            .run_stages(&mut job, &workspace, &video, &extension, &languages)
            .await;

        match &outcome {
            Ok(result) => info!("Job {} completed in {} ms ({} bytes)",
                                job.id, job.elapsed_ms(), result.bytes.len()),
            Err(e) => {
                job.fail(e.kind());
                warn!("Job {} failed after {} ms: {}", job.id, job.elapsed_ms(), e);
            }
        }

        workspace.close();
        outcome
    }

    async fn run_stages(
        &self,
        job: &mut Job,
        workspace: &Workspace,
        video: &[u8],
        extension: &str,
        languages: &LanguagePair,
    ) -> Result<DubbedVideo> {
        // Step 1: Stage the upload
        let input_path = workspace.input_video(extension);
        fs::write(&input_path, video).await?;
        job.advance(JobState::Staged)?;

        // Step 2: Extract audio
        let audio_path = workspace.extracted_audio();
        self.media.extract_audio(&input_path, &audio_path).await?;
        job.advance(JobState::AudioExtracted)?;

        // Step 3: Transcribe in the source language
        let transcript = self.transcriber.transcribe(&audio_path, &languages.source).await?;
        if transcript.trim().is_empty() {
            return Err(RedubError::Transcription("Empty transcript received".to_string()));
        }
        job.advance(JobState::Transcribed)?;

        // Step 4: Translate
        let translated = self.translator
            .translate_text(&transcript, &languages.source, &languages.target)
            .await?;
        if translated.trim().is_empty() {
            return Err(RedubError::Translation("Empty translation received".to_string()));
        }
        job.advance(JobState::Translated)?;

        // Step 5: Synthesize speech
        let speech_path = workspace.synthesized_speech();
        self.synthesizer.synthesize(&translated, &languages.target, &speech_path).await?;
        job.advance(JobState::Synthesized)?;

        // Step 6: Put the new speech under the original video stream
        let output_path = workspace.output_video(extension);
        self.media.replace_audio(&input_path, &speech_path, &output_path).await?;
        job.advance(JobState::Remuxed)?;

        let bytes = fs::read(&output_path).await.map_err(|e| {
            RedubError::Remux(format!("Remuxed output unreadable: {}", e))
        })?;
        job.advance(JobState::Completed)?;

        Ok(DubbedVideo {
            job_id: job.id,
            languages: languages.clone(),
            mime_type: mime_type_for(extension).to_string(),
            bytes,
        })
    }

    /// Extract the audio track of a video file, outside of any job.
    pub async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        self.media.extract_audio(video_path, audio_path).await
    }
}

/// Container extension for workspace files, taken from the upload name.
fn container_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| SUPPORTED_CONTAINERS.contains(&ext.as_str()))
        .unwrap_or_else(|| DEFAULT_CONTAINER.to_string())
}

fn mime_type_for(extension: &str) -> &'static str {
    match extension {
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "m4v" => "video/x-m4v",
        _ => "video/mp4",
    }
}
