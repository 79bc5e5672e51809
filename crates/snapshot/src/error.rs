//! Error types for snapshot resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or resolving a snapshot source.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The two explicit file lists are not parallel.
    #[error(
        "gold list has {gold} files but compare list has {compare}; \
         the two lists must be the same length"
    )]
    MismatchedFileLists { gold: usize, compare: usize },

    /// The git executable could not be run at all.
    #[error("failed to run git: {reason}")]
    GitUnavailable { reason: String },

    /// A configured branch does not resolve to a revision.
    #[error("branch {branch:?} does not exist in {}: {stderr}", .repo.display())]
    UnknownBranch {
        repo: PathBuf,
        branch: String,
        stderr: String,
    },

    /// `git checkout` exited nonzero.
    #[error("checkout of {branch:?} in {} failed: {stderr}", .repo.display())]
    CheckoutFailed {
        repo: PathBuf,
        branch: String,
        stderr: String,
    },
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
