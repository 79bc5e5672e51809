//! File-list resolution for the two populate phases.

use std::path::PathBuf;
use std::process::Command;

use compare_engine::Role;
use tracing::info;

use crate::error::{Result, SnapshotError};

/// Where the gold and compare file lists come from.
///
/// Both variants answer the same question: which files should be read for a
/// given role. The git variant mutates the working tree as a side effect of
/// resolution, so callers must resolve gold first and read those files
/// before resolving compare.
#[derive(Debug)]
pub enum SnapshotSource {
    /// Two explicit, parallel file lists.
    FilePair(FilePairSource),
    /// One file list read under two branch checkouts of the same repository.
    GitBranches(GitBranchSource),
}

impl SnapshotSource {
    /// Check everything that can be checked before any file is read.
    pub fn validate(&self) -> Result<()> {
        match self {
            SnapshotSource::FilePair(_) => Ok(()),
            SnapshotSource::GitBranches(source) => source.validate(),
        }
    }

    /// Produce the file list for one role, performing any checkout needed.
    pub fn resolve(&self, role: Role) -> Result<Vec<PathBuf>> {
        match self {
            SnapshotSource::FilePair(source) => Ok(source.files(role).to_vec()),
            SnapshotSource::GitBranches(source) => source.resolve(role),
        }
    }
}

/// Two parallel lists of already-checked-out files.
#[derive(Debug)]
pub struct FilePairSource {
    gold: Vec<PathBuf>,
    compare: Vec<PathBuf>,
}

impl FilePairSource {
    /// Pair up the two lists. Lists of different lengths are rejected here
    /// so the mismatch surfaces before any file is opened.
    pub fn new(gold: Vec<PathBuf>, compare: Vec<PathBuf>) -> Result<Self> {
        if gold.len() != compare.len() {
            return Err(SnapshotError::MismatchedFileLists {
                gold: gold.len(),
                compare: compare.len(),
            });
        }
        Ok(Self { gold, compare })
    }

    pub fn files(&self, role: Role) -> &[PathBuf] {
        match role {
            Role::Gold => &self.gold,
            Role::Compare => &self.compare,
        }
    }
}

/// One file list read under two checkouts of a git repository.
///
/// Resolving the gold role checks out `old_branch`; resolving the compare
/// role checks out `new_branch`. The repository is left on whichever branch
/// was resolved last, which for a full run means `new_branch`.
#[derive(Debug)]
pub struct GitBranchSource {
    repo: PathBuf,
    old_branch: String,
    new_branch: String,
    files: Vec<PathBuf>,
}

impl GitBranchSource {
    pub fn new(
        repo: impl Into<PathBuf>,
        old_branch: impl Into<String>,
        new_branch: impl Into<String>,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            repo: repo.into(),
            old_branch: old_branch.into(),
            new_branch: new_branch.into(),
            files,
        }
    }

    /// Verify both branches resolve to revisions, so a typo in the
    /// configuration fails before any population happens.
    pub fn validate(&self) -> Result<()> {
        self.verify_branch(&self.old_branch)?;
        self.verify_branch(&self.new_branch)
    }

    pub fn resolve(&self, role: Role) -> Result<Vec<PathBuf>> {
        let branch = match role {
            Role::Gold => &self.old_branch,
            Role::Compare => &self.new_branch,
        };
        self.checkout(branch)?;
        Ok(self.files.clone())
    }

    fn verify_branch(&self, branch: &str) -> Result<()> {
        let output = self.git(&["rev-parse", "--verify", branch])?;
        if !output.status.success() {
            return Err(SnapshotError::UnknownBranch {
                repo: self.repo.clone(),
                branch: branch.to_string(),
                stderr: stderr_text(&output),
            });
        }
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        info!(repo = %self.repo.display(), branch, "checking out branch");
        let output = self.git(&["checkout", branch])?;
        if !output.status.success() {
            return Err(SnapshotError::CheckoutFailed {
                repo: self.repo.clone(),
                branch: branch.to_string(),
                stderr: stderr_text(&output),
            });
        }
        Ok(())
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .map_err(|e| SnapshotError::GitUnavailable {
                reason: e.to_string(),
            })
    }
}

fn stderr_text(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
