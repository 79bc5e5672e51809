//! In-memory store of gold/compare/difference arrays per key.

use std::collections::HashMap;
use std::fmt;

use ndarray::ArrayD;

use crate::error::{EngineError, Result};
use crate::key::VarKey;

/// Which comparison side an array belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Gold,
    Compare,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Gold => "gold",
            Role::Compare => "compare",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compared variable: the two input arrays and their difference.
///
/// `difference` stays empty in the store itself; only the result entries
/// produced by the engine carry a computed difference.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: VarKey,
    pub gold: Option<ArrayD<f64>>,
    pub compare: Option<ArrayD<f64>>,
    pub difference: Option<ArrayD<f64>>,
}

impl Entry {
    fn new(key: VarKey) -> Self {
        Self {
            key,
            gold: None,
            compare: None,
            difference: None,
        }
    }

    pub fn role(&self, role: Role) -> Option<&ArrayD<f64>> {
        match role {
            Role::Gold => self.gold.as_ref(),
            Role::Compare => self.compare.as_ref(),
        }
    }

    fn set_role(&mut self, role: Role, values: ArrayD<f64>) {
        match role {
            Role::Gold => self.gold = Some(values),
            Role::Compare => self.compare = Some(values),
        }
    }
}

/// Insertion-ordered mapping from [`VarKey`] to [`Entry`].
///
/// Iteration yields entries in the order their keys were first registered,
/// which is the order variables were discovered while scanning the gold
/// file list. That order is what makes log and report output reproducible.
#[derive(Debug, Clone, Default)]
pub struct ComparisonStore {
    entries: Vec<Entry>,
    index: HashMap<VarKey, usize>,
}

impl ComparisonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for `key`. Registering an existing key is a
    /// no-op; whatever role data the entry already holds is kept.
    pub fn register(&mut self, key: VarKey) {
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry::new(key));
    }

    /// Store `values` into the named role slot of the entry for `key`.
    /// The key must have been registered first.
    pub fn set_role(&mut self, key: &VarKey, role: Role, values: ArrayD<f64>) -> Result<()> {
        let idx = self
            .index
            .get(key)
            .copied()
            .ok_or_else(|| EngineError::UnknownKey { key: key.clone() })?;
        self.entries[idx].set_role(role, values);
        Ok(())
    }

    pub fn contains(&self, key: &VarKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &VarKey) -> Option<&Entry> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &VarKey> {
        self.entries.iter().map(|e| &e.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn arr(values: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec()).unwrap()
    }

    #[test]
    fn test_set_role_requires_registration() {
        let mut store = ComparisonStore::new();
        let key = VarKey::new("out.nc", "swe");
        let err = store.set_role(&key, Role::Gold, arr(&[1.0])).unwrap_err();
        assert!(matches!(err, EngineError::UnknownKey { .. }));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut store = ComparisonStore::new();
        let key = VarKey::new("out.nc", "swe");
        store.register(key.clone());
        store.set_role(&key, Role::Gold, arr(&[1.0, 2.0])).unwrap();

        store.register(key.clone());
        let entry = store.get(&key).unwrap();
        assert!(entry.gold.is_some(), "re-registering erased role data");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_roles_do_not_overwrite_each_other() {
        let mut store = ComparisonStore::new();
        let key = VarKey::new("out.nc", "swe");
        store.register(key.clone());
        store.set_role(&key, Role::Gold, arr(&[1.0])).unwrap();
        store.set_role(&key, Role::Compare, arr(&[2.0])).unwrap();

        let entry = store.get(&key).unwrap();
        assert_eq!(entry.gold.as_ref().unwrap()[[0]], 1.0);
        assert_eq!(entry.compare.as_ref().unwrap()[[0]], 2.0);
    }

    #[test]
    fn test_last_write_wins_within_a_role() {
        let mut store = ComparisonStore::new();
        let key = VarKey::new("out.nc", "swe");
        store.register(key.clone());
        store.set_role(&key, Role::Gold, arr(&[1.0])).unwrap();
        store.set_role(&key, Role::Gold, arr(&[9.0])).unwrap();

        let entry = store.get(&key).unwrap();
        assert_eq!(entry.gold.as_ref().unwrap()[[0]], 9.0);
    }

    #[test]
    fn test_iteration_preserves_registration_order() {
        let mut store = ComparisonStore::new();
        let keys = ["c", "a", "b"];
        for name in keys {
            store.register(VarKey::new("out.nc", name));
        }
        let seen: Vec<&str> = store.keys().map(|k| k.variable.as_str()).collect();
        assert_eq!(seen, keys);
    }
}
