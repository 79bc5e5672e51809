//! NetCDF implementation of the dataset loader.

use std::path::Path;
use std::sync::Once;

use compare_engine::{DatasetLoader, LoadedVariable, LoaderError};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::NcVariableType;
use tracing::debug;

use crate::error::{NetCdfError, Result};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// This function disables that output by calling H5Eset_auto2 with null handlers.
/// It only needs to be called once per process, but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Reads every numeric variable of a NetCDF file as an f64 array.
///
/// Values are fetched as f64 regardless of the stored type, so integer and
/// f32 variables convert without losing information. Elements equal to the
/// variable's `_FillValue` or `missing_value` attribute become NaN, and
/// `scale_factor`/`add_offset` packing is applied when present. Non-numeric
/// variables (char/string/compound) are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetCdfLoader;

impl NetCdfLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load all numeric variables from `path`, in file definition order.
    pub fn load_file(&self, path: &Path) -> Result<Vec<LoadedVariable>> {
        // Silence HDF5's verbose stderr output for missing attributes
        silence_hdf5_errors();

        let nc_file = netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut variables = Vec::new();
        for var in nc_file.variables() {
            let name = var.name();
            if !is_numeric(&var.vartype()) {
                debug!(variable = %name, "skipping non-numeric variable");
                continue;
            }
            let values = read_variable(&var).map_err(|reason| NetCdfError::ReadFailed {
                path: path.to_path_buf(),
                variable: name.clone(),
                reason,
            })?;
            debug!(variable = %name, shape = ?values.shape(), "loaded variable");
            variables.push(LoadedVariable::new(name, values));
        }
        Ok(variables)
    }
}

impl DatasetLoader for NetCdfLoader {
    fn load(&self, path: &Path) -> std::result::Result<Vec<LoadedVariable>, LoaderError> {
        self.load_file(path).map_err(Into::into)
    }
}

fn is_numeric(vartype: &NcVariableType) -> bool {
    matches!(
        vartype,
        NcVariableType::Int(_) | NcVariableType::Float(_)
    )
}

/// Read one variable into an f64 array, applying fill and packing attributes.
fn read_variable(var: &netcdf::Variable) -> std::result::Result<ArrayD<f64>, String> {
    let raw: Vec<f64> = var.get_values(..).map_err(|e| e.to_string())?;

    // Scalar variables have no dimensions; represent them as one-element
    // vectors so they flow through the same comparison path.
    let shape: Vec<usize> = if var.dimensions().is_empty() {
        vec![raw.len()]
    } else {
        var.dimensions().iter().map(|d| d.len()).collect()
    };

    let fill_value = get_f64_attr(var, "_FillValue").or_else(|| get_f64_attr(var, "missing_value"));
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    let values: Vec<f64> = raw
        .into_iter()
        .map(|v| {
            if fill_value.map(|f| v == f).unwrap_or(false) {
                f64::NAN
            } else {
                v * scale_factor + add_offset
            }
        })
        .collect();

    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|e| e.to_string())
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get an f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
