//! Error types for rendering and output staging.

use compare_engine::VarKey;
use thiserror::Error;

/// Errors that can occur while rendering or persisting figures.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Only rank 1, 2, and 3 arrays have a plot form.
    #[error("cannot plot {key}: rank {rank} arrays have no plot form")]
    UnsupportedRank { key: VarKey, rank: usize },

    /// PNG encoding or staging I/O failed.
    #[error("plot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plot operations.
pub type Result<T> = std::result::Result<T, PlotError>;
