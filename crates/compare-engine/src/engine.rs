//! Population and difference computation over the comparison store.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use ndarray::ArrayD;
use tracing::{debug, error, info, warn};

use crate::error::{EngineError, Result};
use crate::key::VarKey;
use crate::loader::DatasetLoader;
use crate::stats::DiffStats;
use crate::store::{ComparisonStore, Role};

/// Variable names excluded from comparison unless the caller overrides the
/// ignore set: coordinate axes, time, and the grid-mapping variable.
pub const DEFAULT_IGNORE_VARS: [&str; 4] = ["time", "y", "x", "projection"];

/// One comparison result: both inputs, their difference, and its summary.
#[derive(Debug, Clone)]
pub struct DiffEntry {
    pub key: VarKey,
    pub gold: ArrayD<f64>,
    pub compare: ArrayD<f64>,
    pub difference: ArrayD<f64>,
    pub stats: DiffStats,
}

/// Result mapping produced by [`CompareEngine::compute_differences`].
///
/// Iteration order matches store registration order.
#[derive(Debug, Clone, Default)]
pub struct DiffResults {
    entries: Vec<DiffEntry>,
    index: HashMap<VarKey, usize>,
}

impl DiffResults {
    fn push(&mut self, entry: DiffEntry) {
        self.index.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
    }

    pub fn get(&self, key: &VarKey) -> Option<&DiffEntry> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, key: &VarKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DiffResults {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Pairs gold and compare arrays by (file, variable) and reduces them to
/// differences and summary statistics.
///
/// Usage is two-phase: `populate` must run once per role before
/// `compute_differences` produces anything. The store keeps every entry it
/// ever saw; the result mapping is a filtered snapshot of it.
pub struct CompareEngine<L> {
    loader: L,
    ignore_vars: HashSet<String>,
    store: ComparisonStore,
}

impl<L: DatasetLoader> CompareEngine<L> {
    pub fn new(loader: L, ignore_vars: impl IntoIterator<Item = String>) -> Self {
        Self {
            loader,
            ignore_vars: ignore_vars.into_iter().collect(),
            store: ComparisonStore::new(),
        }
    }

    /// Engine with the stock ignore set.
    pub fn with_default_ignores(loader: L) -> Self {
        Self::new(loader, DEFAULT_IGNORE_VARS.iter().map(|s| s.to_string()))
    }

    /// The underlying store, for audit and debugging. Computing differences
    /// never mutates it.
    pub fn store(&self) -> &ComparisonStore {
        &self.store
    }

    /// Load every file in `files` and store each non-ignored variable under
    /// the given role. Called once with [`Role::Gold`] and once with
    /// [`Role::Compare`] per run.
    pub fn populate(&mut self, files: &[PathBuf], role: Role) -> Result<()> {
        info!(role = %role, files = files.len(), "populating comparison store");
        for path in files {
            let variables = self.loader.load(path).map_err(|source| {
                warn!(path = %path.display(), error = %source, "dataset load failed");
                EngineError::Load {
                    path: path.clone(),
                    source,
                }
            })?;
            for var in variables {
                if self.ignore_vars.contains(&var.name) {
                    debug!(variable = %var.name, "skipping ignored variable");
                    continue;
                }
                let key = VarKey::from_path(path, var.name);
                self.store.register(key.clone());
                self.store.set_role(&key, role, var.values)?;
            }
        }
        Ok(())
    }

    /// Compute `compare - gold` for every fully populated entry and reduce
    /// each difference to its statistics.
    ///
    /// With `suppress_zero_mean` set, entries whose difference contains no
    /// nonzero element are dropped from the returned mapping entirely, so
    /// downstream consumers never see them. The store itself is untouched
    /// either way. Entries that received only one role are logged and
    /// skipped. A shape mismatch between roles aborts the run.
    pub fn compute_differences(&self, suppress_zero_mean: bool) -> Result<DiffResults> {
        let mut results = DiffResults::default();
        for entry in self.store.iter() {
            let (gold, compare) = match (&entry.gold, &entry.compare) {
                (Some(g), Some(c)) => (g, c),
                (gold, _) => {
                    let missing = if gold.is_none() {
                        Role::Gold
                    } else {
                        Role::Compare
                    };
                    warn!(key = %entry.key, missing = %missing, "entry has no data for one role, skipping");
                    continue;
                }
            };

            if gold.shape() != compare.shape() {
                error!(
                    key = %entry.key,
                    gold_shape = ?gold.shape(),
                    compare_shape = ?compare.shape(),
                    "shape mismatch between roles"
                );
                return Err(EngineError::ShapeMismatch {
                    key: entry.key.clone(),
                    gold: gold.shape().to_vec(),
                    compare: compare.shape().to_vec(),
                });
            }

            let difference = compare - gold;
            let stats = DiffStats::from_array(&difference);
            info!(
                key = %entry.key,
                mean = stats.mean,
                min = stats.min,
                max = stats.max,
                std_dev = stats.std_dev,
                nonzero = stats.nonzero,
                "difference statistics"
            );

            if suppress_zero_mean && stats.is_all_zero() {
                info!(key = %entry.key, "no differences to report");
                continue;
            }

            results.push(DiffEntry {
                key: entry.key.clone(),
                gold: gold.clone(),
                compare: compare.clone(),
                difference,
                stats,
            });
        }
        Ok(results)
    }
}
