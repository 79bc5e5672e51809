//! Resolves which files each populate phase reads.
//!
//! A comparison run needs two file lists, one per role. The simple case is
//! two explicit lists from the configuration. The other case is one list of
//! paths inside a git working tree, read twice under two different branch
//! checkouts. [`SnapshotSource`] hides the distinction behind a single
//! `resolve(role)` call.

pub mod error;
pub mod source;

pub use error::{Result, SnapshotError};
pub use source::{FilePairSource, GitBranchSource, SnapshotSource};
