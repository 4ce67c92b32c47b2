use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::config::WorkspaceConfig;
use crate::error::Result;

/// Job-scoped scratch directory for intermediate media artifacts.
///
/// Call [`Workspace::close`] on every exit path. Dropping without closing
/// still removes the directory, but any removal error is lost.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create(config: &WorkspaceConfig) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&config.prefix);

        let dir = match &config.root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_video(&self, extension: &str) -> PathBuf {
        self.path().join(format!("input.{}", extension))
    }

    pub fn extracted_audio(&self) -> PathBuf {
        self.path().join("audio.wav")
    }

    pub fn synthesized_speech(&self) -> PathBuf {
        self.path().join("speech.mp3")
    }

    pub fn output_video(&self, extension: &str) -> PathBuf {
        self.path().join(format!("output.{}", extension))
    }

    /// Remove the directory and everything in it. Failures are logged, not returned.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Removed workspace {}", path.display()),
            Err(e) => warn!("Failed to remove workspace {}: {}", path.display(), e),
        }
    }
}
