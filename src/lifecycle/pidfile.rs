//! PID file handling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Holds a written pid file and removes it on drop.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
    pid: u32,
}

impl PidFile {
    /// Write the current process id to `path`, replacing any old content.
    pub fn create(path: &Path) -> io::Result<Self> {
        let pid = std::process::id();
        fs::write(path, pid.to_string())?;
        tracing::debug!(pid, file = %path.display(), "Wrote pid-file");
        Ok(Self {
            path: path.to_path_buf(),
            pid,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(pid = self.pid, file = %self.path.display(), "Removed pid-file"),
            Err(e) => tracing::error!(
                pid = self.pid,
                file = %self.path.display(),
                error = %e,
                "Failed to remove pid-file"
            ),
        }
    }
}
