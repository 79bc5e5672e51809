//! Comparison engine for gold-file regression analysis.
//!
//! Pairs up reference ("gold") and comparison arrays keyed by
//! (file, variable), computes element-wise differences, and reduces each
//! difference to summary statistics for reporting and plotting.
//!
//! # Architecture
//!
//! ```text
//! gold file list ──┐
//!                  ├─► CompareEngine::populate ──► ComparisonStore
//! compare list ────┘        (via DatasetLoader)     (gold/compare slots)
//!                                                        │
//!                                                        ▼
//!                              CompareEngine::compute_differences
//!                                   │ compare - gold, per entry
//!                                   │ DiffStats over the difference
//!                                   ▼
//!                              DiffResults (filtered; store untouched)
//! ```
//!
//! The store is populated fully for both roles before any difference is
//! computed. File formats live behind the [`DatasetLoader`] trait; this
//! crate never touches the filesystem itself.

pub mod engine;
pub mod error;
pub mod key;
pub mod loader;
pub mod stats;
pub mod store;
pub mod testdata;

pub use engine::{CompareEngine, DiffEntry, DiffResults, DEFAULT_IGNORE_VARS};
pub use error::{EngineError, Result};
pub use key::VarKey;
pub use loader::{DatasetLoader, LoadedVariable, LoaderError};
pub use stats::DiffStats;
pub use store::{ComparisonStore, Entry, Role};
