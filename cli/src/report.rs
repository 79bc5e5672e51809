//! Results reporting and formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use compare_engine::DiffResults;
use serde::Serialize;
use std::fmt::Write as _;

/// One report row. Rows keep store insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub file: String,
    pub variable: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub nonzero: usize,
}

/// Formats comparison results for output.
pub struct DiffReport;

impl DiffReport {
    /// Flatten results into report rows.
    pub fn rows(results: &DiffResults) -> Vec<ReportRow> {
        results
            .iter()
            .map(|entry| ReportRow {
                file: entry.key.file.clone(),
                variable: entry.key.variable.clone(),
                mean: entry.stats.mean,
                min: entry.stats.min,
                max: entry.stats.max,
                std_dev: entry.stats.std_dev,
                nonzero: entry.stats.nonzero,
            })
            .collect()
    }

    /// Format results as a console table.
    pub fn format_table(results: &DiffResults) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                "File", "Variable", "Mean", "Min", "Max", "Std", "Nonzero",
            ]);

        for row in Self::rows(results) {
            table.add_row(vec![
                row.file,
                row.variable,
                format!("{:.6e}", row.mean),
                format!("{:.6e}", row.min),
                format!("{:.6e}", row.max),
                format!("{:.6e}", row.std_dev),
                format!("{}", row.nonzero),
            ]);
        }

        table.to_string()
    }

    /// Format results as pretty-printed JSON.
    pub fn format_json(results: &DiffResults) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&Self::rows(results))?)
    }

    /// Format results as CSV, prefixed by a comment line carrying the run
    /// timestamp.
    pub fn format_csv(results: &DiffResults) -> String {
        let mut out = format!("# generated {}\n", chrono::Utc::now().to_rfc3339());
        out.push_str("file,variable,mean,min,max,std_dev,nonzero\n");
        for row in Self::rows(results) {
            let _ = writeln!(
                out,
                "{},{},{:e},{:e},{:e},{:e},{}",
                row.file, row.variable, row.mean, row.min, row.max, row.std_dev, row.nonzero
            );
        }
        out
    }
}
