//! Tests for the populate/compute_differences cycle.

use std::path::PathBuf;

use compare_engine::testdata::{filled, vec1, MemoryLoader};
use compare_engine::{CompareEngine, EngineError, Role, VarKey};
use test_utils::assert_approx_eq;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

// ============================================================================
// populate tests
// ============================================================================

#[test]
fn test_populate_creates_one_entry_per_file_and_variable() {
    let loader = MemoryLoader::new()
        .with_variable("a.nc", "swe", vec1(&[1.0]))
        .with_variable("a.nc", "depth", vec1(&[2.0]))
        .with_variable("b.nc", "swe", vec1(&[3.0]));
    let mut engine = CompareEngine::new(loader, []);

    engine.populate(&paths(&["a.nc", "b.nc"]), Role::Gold).unwrap();
    engine
        .populate(&paths(&["a.nc", "b.nc"]), Role::Compare)
        .unwrap();

    let results = engine.compute_differences(false).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.contains(&VarKey::new("a.nc", "swe")));
    assert!(results.contains(&VarKey::new("a.nc", "depth")));
    assert!(results.contains(&VarKey::new("b.nc", "swe")));
}

#[test]
fn test_populate_skips_ignored_variables() {
    let loader = MemoryLoader::new()
        .with_variable("a.nc", "time", vec1(&[0.0, 1.0]))
        .with_variable("a.nc", "x", vec1(&[0.0, 1.0]))
        .with_variable("a.nc", "swe", vec1(&[5.0, 6.0]));
    let mut engine = CompareEngine::with_default_ignores(loader);

    engine.populate(&paths(&["a.nc"]), Role::Gold).unwrap();

    assert_eq!(engine.store().len(), 1);
    assert!(engine.store().contains(&VarKey::new("a.nc", "swe")));
    assert!(!engine.store().contains(&VarKey::new("a.nc", "time")));
    assert!(!engine.store().contains(&VarKey::new("a.nc", "x")));
}

#[test]
fn test_populate_propagates_load_errors() {
    let loader = MemoryLoader::new().with_variable("a.nc", "swe", vec1(&[1.0]));
    let mut engine = CompareEngine::new(loader, []);

    let err = engine
        .populate(&paths(&["missing.nc"]), Role::Gold)
        .unwrap_err();
    assert!(matches!(err, EngineError::Load { .. }));
    let msg = err.to_string();
    assert!(msg.contains("missing.nc"), "error should name the path: {msg}");
}

#[test]
fn test_populate_keeps_file_declaration_order() {
    let loader = MemoryLoader::new()
        .with_variable("a.nc", "zeta", vec1(&[1.0]))
        .with_variable("a.nc", "alpha", vec1(&[2.0]))
        .with_variable("b.nc", "mid", vec1(&[3.0]));
    let mut engine = CompareEngine::new(loader, []);

    engine.populate(&paths(&["a.nc", "b.nc"]), Role::Gold).unwrap();

    let order: Vec<String> = engine.store().keys().map(|k| k.to_string()).collect();
    assert_eq!(order, ["a.nc:zeta", "a.nc:alpha", "b.nc:mid"]);
}

// ============================================================================
// compute_differences tests
// ============================================================================

#[test]
fn test_difference_is_compare_minus_gold() {
    // Parallel file lists: different directories, same basename, so both
    // sides land on the same key.
    let loader = MemoryLoader::new()
        .with_variable("run1/out.nc", "v", vec1(&[1.0, 2.0, 3.0]))
        .with_variable("run2/out.nc", "v", vec1(&[1.0, 2.0, 4.0]));
    let mut engine = CompareEngine::new(loader, []);

    engine.populate(&paths(&["run1/out.nc"]), Role::Gold).unwrap();
    engine
        .populate(&paths(&["run2/out.nc"]), Role::Compare)
        .unwrap();

    let results = engine.compute_differences(false).unwrap();
    assert_eq!(results.len(), 1);
    let entry = results.get(&VarKey::new("out.nc", "v")).unwrap();
    assert_eq!(entry.difference, vec1(&[0.0, 0.0, 1.0]));
    assert_approx_eq!(entry.stats.mean, 1.0 / 3.0, 1e-12);
}

#[test]
fn test_difference_elementwise_2d() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", filled(&[2, 3], 10.0))
        .with_variable("c/out.nc", "v", filled(&[2, 3], 12.5));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(false).unwrap();
    let entry = results.get(&VarKey::new("out.nc", "v")).unwrap();
    assert_eq!(entry.difference, filled(&[2, 3], 2.5));
    assert_eq!(entry.stats.min, 2.5);
    assert_eq!(entry.stats.max, 2.5);
    assert_eq!(entry.stats.nonzero, 6);
}

#[test]
fn test_shape_mismatch_is_fatal() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", filled(&[2, 3], 1.0))
        .with_variable("c/out.nc", "v", filled(&[3, 2], 1.0));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let err = engine.compute_differences(false).unwrap_err();
    match err {
        EngineError::ShapeMismatch { key, gold, compare } => {
            assert_eq!(key, VarKey::new("out.nc", "v"));
            assert_eq!(gold, vec![2, 3]);
            assert_eq!(compare, vec![3, 2]);
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_entry_with_one_role_is_skipped() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "both", vec1(&[1.0]))
        .with_variable("g/out.nc", "gold_only", vec1(&[9.0]))
        .with_variable("c/out.nc", "both", vec1(&[2.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(false).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results.contains(&VarKey::new("out.nc", "both")));
    assert!(!results.contains(&VarKey::new("out.nc", "gold_only")));
}

#[test]
fn test_results_preserve_store_order() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "c_var", vec1(&[1.0]))
        .with_variable("g/out.nc", "a_var", vec1(&[1.0]))
        .with_variable("g/out.nc", "b_var", vec1(&[1.0]))
        .with_variable("c/out.nc", "c_var", vec1(&[2.0]))
        .with_variable("c/out.nc", "a_var", vec1(&[2.0]))
        .with_variable("c/out.nc", "b_var", vec1(&[2.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(false).unwrap();
    let order: Vec<&str> = results.iter().map(|e| e.key.variable.as_str()).collect();
    assert_eq!(order, ["c_var", "a_var", "b_var"]);
}

#[test]
fn test_store_is_untouched_by_compute() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", vec1(&[1.0, 2.0]))
        .with_variable("c/out.nc", "v", vec1(&[1.0, 2.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    // Suppression drops the entry from the results but never from the store.
    let results = engine.compute_differences(true).unwrap();
    assert!(results.is_empty());

    let entry = engine.store().get(&VarKey::new("out.nc", "v")).unwrap();
    assert!(entry.gold.is_some());
    assert!(entry.compare.is_some());
    assert!(entry.difference.is_none(), "store entries never gain a difference");
    assert_eq!(engine.store().len(), 1);
}

// ============================================================================
// suppression filter tests
// ============================================================================

#[test]
fn test_suppress_zero_mean_drops_uniformly_zero_entries() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "same", vec1(&[3.0, 4.0]))
        .with_variable("g/out.nc", "differs", vec1(&[1.0, 1.0]))
        .with_variable("c/out.nc", "same", vec1(&[3.0, 4.0]))
        .with_variable("c/out.nc", "differs", vec1(&[1.0, 2.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(true).unwrap();
    assert_eq!(results.len(), 1);
    assert!(!results.contains(&VarKey::new("out.nc", "same")));
    assert!(results.contains(&VarKey::new("out.nc", "differs")));
}

#[test]
fn test_suppress_keeps_entries_whose_mean_cancels_to_zero() {
    // A symmetric difference has exactly zero mean but real deviations;
    // the filter keys on the presence of nonzero elements, so it stays.
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", vec1(&[1.0, 1.0]))
        .with_variable("c/out.nc", "v", vec1(&[0.0, 2.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(true).unwrap();
    let entry = results.get(&VarKey::new("out.nc", "v")).unwrap();
    assert_eq!(entry.stats.mean, 0.0);
    assert_eq!(entry.stats.nonzero, 2);
}

#[test]
fn test_identical_snapshots_with_suppression_yield_empty_results() {
    let loader = MemoryLoader::new()
        .with_variable("out.nc", "a", vec1(&[1.0, 2.0, 3.0]))
        .with_variable("out.nc", "b", filled(&[4, 5], 7.0));
    let mut engine = CompareEngine::new(loader, []);

    // Same file list for both roles, as a branch comparison with no actual
    // change would produce.
    engine.populate(&paths(&["out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(true).unwrap();
    assert!(results.is_empty());

    // Without suppression the same run reports every pair.
    let unfiltered = engine.compute_differences(false).unwrap();
    assert_eq!(unfiltered.len(), 2);
}

#[test]
fn test_gold_and_compare_arrays_survive_into_results() {
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", vec1(&[1.0, 2.0]))
        .with_variable("c/out.nc", "v", vec1(&[3.0, 5.0]));
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(false).unwrap();
    let entry = results.get(&VarKey::new("out.nc", "v")).unwrap();
    assert_eq!(entry.gold, vec1(&[1.0, 2.0]));
    assert_eq!(entry.compare, vec1(&[3.0, 5.0]));
    assert_eq!(entry.difference, vec1(&[2.0, 3.0]));
}

#[test]
fn test_nan_cells_do_not_poison_statistics() {
    let gold = vec1(&[1.0, f64::NAN, 3.0]);
    let compare = vec1(&[2.0, f64::NAN, 3.0]);
    let loader = MemoryLoader::new()
        .with_variable("g/out.nc", "v", gold)
        .with_variable("c/out.nc", "v", compare);
    let mut engine = CompareEngine::new(loader, []);
    engine.populate(&paths(&["g/out.nc"]), Role::Gold).unwrap();
    engine.populate(&paths(&["c/out.nc"]), Role::Compare).unwrap();

    let results = engine.compute_differences(false).unwrap();
    let entry = results.get(&VarKey::new("out.nc", "v")).unwrap();
    // NaN - NaN stays NaN in the difference and is skipped by the reducers.
    assert!(entry.difference[[1]].is_nan());
    assert_eq!(entry.stats.mean, 0.5);
    assert_eq!(entry.stats.nonzero, 1);
}
