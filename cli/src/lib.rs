//! Gold/compare regression diffing for NetCDF outputs.
//!
//! This crate provides the `golddiff` binary's building blocks:
//! - YAML-driven run configuration with two snapshot modes
//! - Run orchestration: populate both roles, diff, render figures
//! - Per-variable statistics reports (console table, JSON, CSV)
//! - A single-file `inspect` listing for choosing `ignore_vars`

pub mod config;
pub mod inspect;
pub mod report;
pub mod run;

pub use config::CompareConfig;
pub use inspect::inspect_file;
pub use report::{DiffReport, ReportRow};
pub use run::execute;
