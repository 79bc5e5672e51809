//! Error types for NetCDF loading.

use std::path::PathBuf;

use thiserror::Error;

use compare_engine::LoaderError;

/// Errors that can occur while reading a NetCDF file.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// The file could not be opened or is not valid NetCDF.
    #[error("failed to open NetCDF file {}: {reason}", .path.display())]
    OpenFailed { path: PathBuf, reason: String },

    /// A variable's values could not be read.
    #[error("failed to read variable {variable} from {}: {reason}", .path.display())]
    ReadFailed {
        path: PathBuf,
        variable: String,
        reason: String,
    },
}

impl From<NetCdfError> for LoaderError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::OpenFailed { path, reason } => LoaderError::OpenFailed { path, reason },
            NetCdfError::ReadFailed {
                path,
                variable,
                reason,
            } => LoaderError::ReadFailed {
                path,
                variable,
                reason,
            },
        }
    }
}

/// Result type for NetCDF operations.
pub type Result<T> = std::result::Result<T, NetCdfError>;
