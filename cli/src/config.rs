//! Configuration loading and management.

use anyhow::{bail, Context};
use compare_engine::DEFAULT_IGNORE_VARS;
use serde::{Deserialize, Serialize};
use snapshot::{FilePairSource, GitBranchSource, SnapshotSource};
use std::path::{Path, PathBuf};

/// Main comparison configuration loaded from YAML.
///
/// Two modes are recognized. The explicit file-pair mode reads
/// `gold_files` and `compare_files` as parallel lists. The git mode reads
/// `gold_files` twice, once under `old_branch` and once under `new_branch`
/// of the working tree at `repo_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Label for the kind of files under comparison; echoed in output.
    #[serde(default = "default_file_type")]
    pub file_type: String,

    /// Destination directory for rendered figures.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Reference files. In git mode these paths are read under both
    /// branches.
    pub gold_files: Vec<PathBuf>,

    /// Comparison files for the explicit file-pair mode.
    #[serde(default)]
    pub compare_files: Vec<PathBuf>,

    /// Variables excluded from comparison.
    #[serde(default = "default_ignore_vars")]
    pub ignore_vars: Vec<String>,

    /// Drop entries whose difference has no nonzero element.
    #[serde(default)]
    pub only_report_nonzero: bool,

    #[serde(default)]
    pub repo_path: Option<PathBuf>,
    #[serde(default)]
    pub old_branch: Option<String>,
    #[serde(default)]
    pub new_branch: Option<String>,

    /// Render the gold and compare panels alongside the difference.
    #[serde(default = "default_true")]
    pub plot_original_data: bool,

    /// Append a histogram panel of the difference values.
    #[serde(default)]
    pub include_histogram: bool,
}

fn default_file_type() -> String {
    "netcdf".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_ignore_vars() -> Vec<String> {
    DEFAULT_IGNORE_VARS.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

impl CompareConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: CompareConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Validate mode consistency and list lengths. Runs before any file or
    /// repository is touched.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gold_files.is_empty() {
            bail!("gold_files must name at least one file");
        }
        self.source().map(|_| ())
    }

    /// Build the snapshot source this configuration describes.
    pub fn source(&self) -> anyhow::Result<SnapshotSource> {
        match (&self.repo_path, &self.old_branch, &self.new_branch) {
            (None, None, None) => {
                if self.compare_files.is_empty() {
                    bail!(
                        "config selects no mode: set compare_files, or \
                         repo_path/old_branch/new_branch"
                    );
                }
                let pair =
                    FilePairSource::new(self.gold_files.clone(), self.compare_files.clone())?;
                Ok(SnapshotSource::FilePair(pair))
            }
            (Some(repo), Some(old), Some(new)) => {
                if !self.compare_files.is_empty() {
                    bail!("compare_files cannot be combined with the git branch mode");
                }
                Ok(SnapshotSource::GitBranches(GitBranchSource::new(
                    repo.clone(),
                    old.clone(),
                    new.clone(),
                    self.gold_files.clone(),
                )))
            }
            _ => bail!("git mode needs repo_path, old_branch, and new_branch together"),
        }
    }

    /// Output directory with `~` expanded, made absolute against the
    /// current directory.
    pub fn resolved_output_dir(&self) -> anyhow::Result<PathBuf> {
        let expanded = expand_home(&self.output_dir);
        if expanded.is_absolute() {
            Ok(expanded)
        } else {
            Ok(std::env::current_dir()?.join(expanded))
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
