//! Composite keys identifying one compared variable.

use std::fmt;
use std::path::Path;

/// Identifies one (source file, variable) pair in the comparison store.
///
/// The file component is the basename of the source path, so the same
/// logical file matches across checkouts and across parallel directory
/// trees whose leading paths differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarKey {
    /// Basename of the source file.
    pub file: String,
    /// Variable name within the file.
    pub variable: String,
}

impl VarKey {
    pub fn new(file: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            variable: variable.into(),
        }
    }

    /// Build a key from a source path, keeping only its basename.
    pub fn from_path(path: &Path, variable: impl Into<String>) -> Self {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(file, variable)
    }
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.variable)
    }
}
