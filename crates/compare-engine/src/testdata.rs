//! In-memory loader for exercising the engine without file I/O.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::{ArrayD, IxDyn};

use crate::loader::{DatasetLoader, LoadedVariable, LoaderError};

/// A [`DatasetLoader`] backed by a map of preloaded variables.
///
/// Tests stage files with [`MemoryLoader::insert`] (or the `with_variable`
/// builder) and the engine reads them back by path. Unknown paths fail the
/// same way an unreadable file would.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, Vec<LoadedVariable>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variable to the staged file at `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, name: &str, values: ArrayD<f64>) {
        self.files
            .entry(path.into())
            .or_default()
            .push(LoadedVariable::new(name, values));
    }

    /// Builder form of [`MemoryLoader::insert`].
    pub fn with_variable(
        mut self,
        path: impl Into<PathBuf>,
        name: &str,
        values: ArrayD<f64>,
    ) -> Self {
        self.insert(path, name, values);
        self
    }
}

impl DatasetLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<Vec<LoadedVariable>, LoaderError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoaderError::OpenFailed {
                path: path.to_path_buf(),
                reason: "no such staged file".to_string(),
            })
    }
}

/// 1-D array from a slice, for concise test fixtures.
pub fn vec1(values: &[f64]) -> ArrayD<f64> {
    ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec())
        .expect("slice length always matches its own shape")
}

/// Array of the given shape filled with one value.
pub fn filled(shape: &[usize], value: f64) -> ArrayD<f64> {
    ArrayD::from_elem(IxDyn(shape), value)
}
