//! Error types for the comparison engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::key::VarKey;
use crate::loader::LoaderError;

/// Errors that can occur while populating or comparing.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Role data arrived for a key that was never registered.
    #[error("unknown key {key}: role data arrived for an unregistered variable")]
    UnknownKey { key: VarKey },

    /// Gold and compare arrays for the same key differ in shape.
    #[error("shape mismatch for {key}: gold {gold:?} vs compare {compare:?}")]
    ShapeMismatch {
        key: VarKey,
        gold: Vec<usize>,
        compare: Vec<usize>,
    },

    /// A dataset failed to load.
    #[error("failed to load {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoaderError,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
