use std::fs::File;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use sph_scaling_summariser::{render_summary, summarise_file};

/// Summarise the results files written by the scaling scenarios.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct SummariserCli {
    /// Results files to summarise
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the summaries as JSON to this path. The file must not already exist.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log failed files instead of exiting with an error
    #[arg(long, default_value_t = false)]
    ignore_errors: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = SummariserCli::parse();

    let total_files = cli.files.len();
    let mut errors = vec![];
    let mut summaries = vec![];

    for path in &cli.files {
        match summarise_file(path) {
            Ok(summary) => {
                println!("{}", render_summary(&summary));
                summaries.push(summary);
            }
            Err(e) => {
                log::error!("Failed to summarise {}: {e:?}", path.display());
                errors.push(e);
            }
        }
    }

    if let Some(report_path) = &cli.report {
        let report = File::create_new(report_path)?;
        serde_json::to_writer_pretty(report, &summaries)?;
        log::info!("Wrote summary report to {}", report_path.display());
    }

    if !errors.is_empty() {
        let error_message = format!(
            "{} out of {} files failed:\n{:#?}",
            errors.len(),
            total_files,
            errors
        );

        if cli.ignore_errors {
            log::warn!("{}", error_message);
        } else {
            return Err(anyhow!(error_message));
        }
    }

    Ok(())
}
