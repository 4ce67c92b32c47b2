use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, RedubError};

/// Lifecycle of a single dubbing job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Created,
    Staged,
    AudioExtracted,
    Transcribed,
    Translated,
    Synthesized,
    Remuxed,
    Completed,
    Failed(String),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }

    /// The only non-failure state reachable from this one.
    fn successor(&self) -> Option<JobState> {
        match self {
            Self::Created => Some(Self::Staged),
            Self::Staged => Some(Self::AudioExtracted),
            Self::AudioExtracted => Some(Self::Transcribed),
            Self::Transcribed => Some(Self::Translated),
            Self::Translated => Some(Self::Synthesized),
            Self::Synthesized => Some(Self::Remuxed),
            Self::Remuxed => Some(Self::Completed),
            Self::Completed | Self::Failed(_) => None,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "Failed({})", reason),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    state: JobState,
}

impl Job {
    pub fn new() -> Self {
        let job = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: JobState::Created,
        };
        debug!("Job {} created", job.id);
        job
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Move to the next state in sequence; anything else is rejected.
    pub fn advance(&mut self, next: JobState) -> Result<()> {
        match self.state.successor() {
            Some(expected) if expected == next => {
                info!("Job {}: {} -> {}", self.id, self.state, next);
                self.state = next;
                Ok(())
            }
            _ => Err(RedubError::Unclassified(format!(
                "illegal job transition {} -> {}",
                self.state, next
            ))),
        }
    }

    /// Absorb a failure; a job that already finished keeps its state.
    pub fn fail(&mut self, reason: &str) {
        if self.state.is_terminal() {
            return;
        }
        warn!("Job {}: {} -> Failed ({})", self.id, self.state, reason);
        self.state = JobState::Failed(reason.to_string());
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}
