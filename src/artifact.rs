use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::ScheduleError;

/// File name the page source is saved under when a run is denied.
pub const DEBUG_PAGE_NAME: &str = "spordle_games_debug.html";

/// Somewhere to keep evidence for a later manual look.
pub trait DiagnosticSink {
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, ScheduleError>;
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, ScheduleError> {
        (**self).write_artifact(name, content)
    }
}

/// Writes artifacts as files into one directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DiagnosticSink for FsArtifactSink {
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, ScheduleError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "Saved diagnostic artifact");
        Ok(path)
    }
}
