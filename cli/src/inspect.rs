//! Single-file variable listing.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use compare_engine::{DatasetLoader, DiffStats};
use netcdf_loader::NetCdfLoader;
use std::path::Path;
use tracing::info;

/// List the variables of one file as a table: name, shape, min/mean/max.
///
/// Answers "what would be compared" for a candidate file, which is the
/// quickest way to decide what belongs in `ignore_vars`. Every variable is
/// listed, including the ones the default ignore set would drop.
pub fn inspect_file(path: &Path) -> anyhow::Result<String> {
    let variables = NetCdfLoader::new().load(path)?;
    info!(path = %path.display(), variables = variables.len(), "inspected file");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Variable", "Shape", "Min", "Mean", "Max"]);

    for var in &variables {
        let stats = DiffStats::from_array(&var.values);
        table.add_row(vec![
            var.name.clone(),
            format_shape(var.values.shape()),
            format!("{:.6e}", stats.min),
            format!("{:.6e}", stats.mean),
            format!("{:.6e}", stats.max),
        ]);
    }

    Ok(table.to_string())
}

fn format_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    format!("[{}]", dims.join(", "))
}
