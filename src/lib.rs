//! Redub - Automated Video Dubbing Workflow
//!
//! Replaces the spoken audio of a short video with synthesized speech in
//! another language: ffmpeg extracts the audio, a speech-to-text service
//! transcribes it, a translation service translates the transcript, a TTS
//! engine speaks it, and ffmpeg puts the new speech under the original video.

pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod language;
pub mod media;
pub mod server;
pub mod synthesize;
pub mod transcribe;
pub mod translate;
pub mod workflow;
pub mod workspace;
