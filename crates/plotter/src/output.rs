//! Staged replacement of the plot output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::Result;

/// Collects rendered files in a scratch directory and only replaces the
/// destination once every render has succeeded.
///
/// Replacing the destination deletes whatever was there, without asking.
/// Staging confines that destruction to `commit`: dropping the stage
/// without committing removes the scratch directory and leaves any prior
/// destination untouched.
#[derive(Debug)]
pub struct OutputStage {
    dest: PathBuf,
    staging: TempDir,
}

impl OutputStage {
    /// Open a stage whose commit target is `dest`. The scratch directory is
    /// created next to `dest` so the final rename stays on one filesystem.
    pub fn begin(dest: impl Into<PathBuf>) -> Result<Self> {
        let dest = dest.into();
        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".golddiff-staging-")
            .tempdir_in(&parent)?;
        debug!(staging = %staging.path().display(), "created staging directory");
        Ok(Self { dest, staging })
    }

    /// Where renders are written before commit.
    pub fn path(&self) -> &Path {
        self.staging.path()
    }

    pub fn write_file(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.staging.path().join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Swap the staged directory into place, deleting any prior destination.
    pub fn commit(self) -> Result<PathBuf> {
        if self.dest.exists() {
            fs::remove_dir_all(&self.dest)?;
        }
        let staged = self.staging.keep();
        fs::rename(&staged, &self.dest)?;
        info!(output = %self.dest.display(), "output directory committed");
        Ok(self.dest)
    }
}
