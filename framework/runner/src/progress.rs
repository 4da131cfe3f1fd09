use indicatif::{ProgressBar, ProgressStyle};

/// Displays a progress bar over the planned runs of a sweep.
///
/// The caller advances it once per planned run, whether or not the run produced a row.
pub fn start_progress(total_runs: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_runs);
    match ProgressStyle::with_template(
        "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} runs [{elapsed_precise}] {msg}",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::debug!("Using default progress style: {e}"),
    }
    pb
}
