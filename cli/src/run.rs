//! Comparison run orchestration.

use crate::config::CompareConfig;
use compare_engine::{CompareEngine, DiffResults, Role};
use netcdf_loader::NetCdfLoader;
use plotter::{plot_filename, render_entry, OutputStage, PlotError, PlotOptions};
use tracing::{info, warn};

/// Execute one comparison run: resolve both snapshots, populate the store,
/// compute differences, and (optionally) render one figure per entry.
///
/// Plot rendering is staged: the destination directory is only replaced
/// after every figure encoded cleanly.
pub fn execute(config: &CompareConfig, render_plots: bool) -> anyhow::Result<DiffResults> {
    config.validate()?;

    let source = config.source()?;
    source.validate()?;

    info!(
        file_type = %config.file_type,
        gold_files = config.gold_files.len(),
        "starting comparison"
    );

    let mut engine = CompareEngine::new(NetCdfLoader::new(), config.ignore_vars.iter().cloned());

    let gold = source.resolve(Role::Gold)?;
    engine.populate(&gold, Role::Gold)?;

    let compare = source.resolve(Role::Compare)?;
    engine.populate(&compare, Role::Compare)?;

    let results = engine.compute_differences(config.only_report_nonzero)?;
    info!(entries = results.len(), "comparison complete");

    if render_plots {
        write_plots(&results, config)?;
    }

    Ok(results)
}

/// Render every entry into a staged directory and swap it into place.
///
/// An entry with no plot form (rank 0 or rank > 3) is skipped with a
/// warning; its statistics still appear in the report. Encoding or I/O
/// failures abandon the stage and leave any previous output untouched.
fn write_plots(results: &DiffResults, config: &CompareConfig) -> anyhow::Result<()> {
    if results.is_empty() {
        info!("no entries to plot");
        return Ok(());
    }

    let dest = config.resolved_output_dir()?;
    let options = PlotOptions {
        plot_original_data: config.plot_original_data,
        include_histogram: config.include_histogram,
    };

    let stage = OutputStage::begin(dest)?;
    let mut written = 0usize;
    for entry in results {
        match render_entry(entry, options) {
            Ok(png) => {
                stage.write_file(&plot_filename(&entry.key), &png)?;
                written += 1;
            }
            Err(PlotError::UnsupportedRank { key, rank }) => {
                warn!(%key, rank, "no plot form for this rank, skipping figure");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let committed = stage.commit()?;
    info!(figures = written, path = %committed.display(), "plots written");
    Ok(())
}
