#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use redub::config::Config;
use redub::error::{Result, RedubError};
use redub::media::MediaProcessorTrait;
use redub::synthesize::SynthesizerTrait;
use redub::transcribe::TranscriberTrait;
use redub::translate::Translator;
use redub::workflow::Workflow;

/// Shared record of which collaborator was called with what.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct FakeMedia {
    pub calls: CallLog,
    pub has_audio_track: bool,
    pub output: Vec<u8>,
}

#[async_trait]
impl MediaProcessorTrait for FakeMedia {
    async fn extract_audio(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(format!("extract {}", file_name(video_path)));
        if !self.has_audio_track {
            return Err(RedubError::MediaExtraction(
                "Output file #0 does not contain any stream".to_string(),
            ));
        }
        std::fs::write(audio_path, b"RIFF....WAVE")?;
        Ok(())
    }

    async fn replace_audio(
        &self,
        video_path: &Path,
        speech_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(format!(
            "remux {} {} {}",
            file_name(video_path),
            file_name(speech_path),
            file_name(output_path)
        ));
        std::fs::write(output_path, &self.output)?;
        Ok(())
    }

    async fn check_availability(&self) -> Result<String> {
        Ok("ffmpeg version fake".to_string())
    }
}

pub struct FakeTranscriber {
    pub calls: CallLog,
    pub transcript: String,
}

#[async_trait]
impl TranscriberTrait for FakeTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("transcribe {} {}", file_name(audio_path), language));
        Ok(self.transcript.clone())
    }
}

pub struct FakeTranslator {
    pub calls: CallLog,
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate_text(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("translate {} {} {}", text, source, target));
        Ok(match target {
            "hi" => "नमस्ते".to_string(),
            _ => "hello".to_string(),
        })
    }
}

pub struct FakeSynthesizer {
    pub calls: CallLog,
}

#[async_trait]
impl SynthesizerTrait for FakeSynthesizer {
    async fn synthesize(&self, text: &str, language: &str, output_path: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("synthesize {} {}", text, language));
        std::fs::write(output_path, b"ID3")?;
        Ok(())
    }
}

pub struct Harness {
    pub workflow: Workflow,
    pub calls: CallLog,
    pub workspace_root: PathBuf,
    _root: tempfile::TempDir,
}

pub fn harness(has_audio_track: bool) -> Harness {
    let root = tempfile::tempdir().unwrap();
    let workspace_root = root.path().join("jobs");

    let mut config = Config::default();
    config.workspace.root = Some(workspace_root.clone());
    config.transcriber.api_key = Some("test-key".to_string());

    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let workflow = Workflow::with_components(
        config,
        Box::new(FakeMedia {
            calls: calls.clone(),
            has_audio_track,
            output: b"dubbed-video".to_vec(),
        }),
        Box::new(FakeTranscriber {
            calls: calls.clone(),
            transcript: "hello".to_string(),
        }),
        Box::new(FakeTranslator { calls: calls.clone() }),
        Box::new(FakeSynthesizer { calls: calls.clone() }),
    );

    Harness {
        workflow,
        calls,
        workspace_root,
        _root: root,
    }
}

impl Harness {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Workspaces still on disk under the configured root.
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(&self.workspace_root)
            .map(|dir| dir.count())
            .unwrap_or(0)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
