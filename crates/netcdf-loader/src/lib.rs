//! NetCDF dataset loading for the comparison engine.
//!
//! Wraps the `netcdf` crate (HDF5-backed) behind the engine's
//! [`DatasetLoader`](compare_engine::DatasetLoader) seam. Every numeric
//! variable of a file is materialized as an `ArrayD<f64>`, with fill values
//! mapped to NaN so downstream statistics can skip missing cells.

pub mod error;
pub mod reader;

pub use error::{NetCdfError, Result};
pub use reader::{silence_hdf5_errors, NetCdfLoader};
