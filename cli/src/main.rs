//! Gold/compare diff CLI for NetCDF outputs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "golddiff")]
#[command(about = "Compare gold and test NetCDF outputs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison from a config file
    Run {
        /// Path to config YAML file
        #[arg(short, long)]
        config: PathBuf,

        /// Override the output directory for rendered figures
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only report entries with a nonzero difference
        #[arg(long)]
        only_report_nonzero: bool,

        /// Skip figure rendering
        #[arg(long)]
        no_plots: bool,

        /// Output format: table (default), json, csv
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Log level
        #[arg(long, default_value = "info")]
        log_level: String,
    },

    /// List the variables of a single file
    Inspect {
        /// Path to a NetCDF file
        file: PathBuf,

        /// Log level
        #[arg(long, default_value = "info")]
        log_level: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config: config_path,
            output_dir,
            only_report_nonzero,
            no_plots,
            format,
            log_level,
        } => {
            init_tracing(&log_level)?;

            println!("Loading config: {}", config_path.display());
            let mut config = golddiff::CompareConfig::from_file(&config_path)?;

            // Apply overrides
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if only_report_nonzero {
                config.only_report_nonzero = true;
            }

            let results = golddiff::run::execute(&config, !no_plots)?;

            match format.as_str() {
                "json" => {
                    println!("{}", golddiff::DiffReport::format_json(&results)?);
                }
                "csv" => {
                    print!("{}", golddiff::DiffReport::format_csv(&results));
                }
                _ => {
                    println!("{}", golddiff::DiffReport::format_table(&results));
                }
            }

            Ok(())
        }
        Commands::Inspect { file, log_level } => {
            init_tracing(&log_level)?;

            println!("{}", golddiff::inspect_file(&file)?);
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
