//! Seam between the engine and concrete dataset readers.

use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use thiserror::Error;

/// One variable extracted from a dataset file.
#[derive(Debug, Clone)]
pub struct LoadedVariable {
    pub name: String,
    pub values: ArrayD<f64>,
}

impl LoadedVariable {
    pub fn new(name: impl Into<String>, values: ArrayD<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Errors surfaced by dataset loaders.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to open {}: {reason}", .path.display())]
    OpenFailed { path: PathBuf, reason: String },

    #[error("failed to read variable {variable} from {}: {reason}", .path.display())]
    ReadFailed {
        path: PathBuf,
        variable: String,
        reason: String,
    },
}

/// Produces the variables of one dataset file.
///
/// Implementations own the file format; the engine only ever sees variable
/// names and f64 arrays. Variables must be yielded in the order the file
/// declares them so store insertion order stays reproducible.
pub trait DatasetLoader {
    fn load(&self, path: &Path) -> Result<Vec<LoadedVariable>, LoaderError>;
}
