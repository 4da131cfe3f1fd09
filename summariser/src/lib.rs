use std::path::Path;

use anyhow::Context;
use tabled::settings::Style;
use tabled::Table;

use crate::model::ScalingSummary;

mod analyze;
mod frame;
pub mod model;

pub use frame::LoadError;

/// Read back a results file and summarise the scaling it recorded.
pub fn summarise_file(path: &Path) -> anyhow::Result<ScalingSummary> {
    let (mode, frame) = frame::load_from_file(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))?;
    let metric = mode.metric_label();

    let groups = analyze::group_peaks(&frame, metric).context("Group peaks")?;

    let scaling_runs = analyze::without_baselines(&frame)?;
    let metric_stats = if scaling_runs.height() > 0 {
        Some(analyze::standard_ratio_stats(scaling_runs, metric).context("Metric stats")?)
    } else {
        None
    };

    log::debug!(
        "Summarised {} runs in {} groups from {}",
        frame.height(),
        groups.len(),
        path.display()
    );

    Ok(ScalingSummary {
        file: path.display().to_string(),
        mode: mode.to_string(),
        metric: metric.to_string(),
        runs: frame.height(),
        groups,
        metric_stats,
    })
}

/// Render a summary for the terminal.
pub fn render_summary(summary: &ScalingSummary) -> String {
    let mut out = format!(
        "{} ({} scaling, {} runs, metric: {})\n",
        summary.file, summary.mode, summary.runs, summary.metric
    );

    if summary.groups.is_empty() {
        out.push_str("No measured runs\n");
        return out;
    }

    let mut table = Table::new(&summary.groups);
    table.with(Style::modern());
    out.push_str(&table.to_string());
    out.push('\n');

    if let Some(stats) = &summary.metric_stats {
        out.push_str(&format!(
            "{}: mean {:.4}, std {:.4}, min {:.4}, max {:.4}\n",
            summary.metric, stats.mean, stats.std, stats.min, stats.max
        ));
    }

    out
}
