use std::path::PathBuf;

use indicatif::ProgressBar;

use crate::binary::executable_path;
use crate::definition::SweepDefinitionBuilder;
use crate::executor::{ExecutionFailure, ProcessExecutor, RunExecutor};
use crate::extract::extract_total_time;
use crate::metric::GroupBaseline;
use crate::output::OutputWriter;
use crate::progress::start_progress;
use crate::sweep::{RunSpec, SweepConfig};
use crate::table::{ResultRow, ResultTable};
use crate::types::ScalingResult;

/// Why a run contributed no row to the results. None of these stop the sweep.
#[derive(Debug, thiserror::Error)]
pub enum RunFailure {
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
    #[error("No 'Total Time' line with a decimal time in the simulation output")]
    Extraction,
    #[error("No baseline time for {base_problem_size} particles")]
    BaselineUnavailable { base_problem_size: u64 },
}

/// Run the sweep described by `definition` and write its results.
///
/// Returns the path of the results file. Failed runs are logged and left out of the results, only
/// setup problems and a failure to write the results are returned as errors.
pub fn run(definition: SweepDefinitionBuilder) -> ScalingResult<PathBuf> {
    let definition = definition.build()?;
    let mode = definition.config.mode;

    log::info!(
        "Running sweep: {} ({mode} scaling, {} launcher)",
        definition.name,
        definition.launcher
    );

    let executable = executable_path(&definition.default_executable)?;
    let executor = ProcessExecutor::new(definition.launcher, executable, definition.timeout)?;

    let writer = OutputWriter::new(definition.output_dir, definition.output_base);
    log::info!(
        "Results will be written to {}",
        writer.next_free_path().display()
    );

    let progress = (!definition.no_progress).then(|| start_progress(definition.config.total_runs()));
    let table = run_sweep(&definition.config, &executor, progress.as_ref());
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    let path = writer.write(&table, mode)?;

    println!("\nScaling results ({mode})");
    println!("{}", table.render(mode));
    log::info!(
        "Wrote {} results to {}",
        table.row_count(),
        path.display()
    );

    Ok(path)
}

/// Run every point of the sweep in order and collect the results.
///
/// Each problem size group starts with its baseline run, followed by the swept worker counts in
/// ascending order, and is closed with a separator even if no run in it succeeded. If the baseline
/// of a group fails, the rest of that group is skipped without running the simulation.
pub fn run_sweep<E>(
    config: &SweepConfig,
    executor: &E,
    progress: Option<&ProgressBar>,
) -> ResultTable
where
    E: RunExecutor + ?Sized,
{
    let mut table = ResultTable::new();
    let mut baseline = GroupBaseline::default();

    for base_problem_size in config.problem_sizes() {
        baseline.reset();

        let run = config.baseline_run(base_problem_size);
        report_progress(progress, &run);
        match measure_baseline(executor, &run, &mut baseline) {
            Ok(row) => table.add_row(row),
            Err(e) => log_failure(&run, &e),
        }

        for worker_count in config.worker_counts() {
            let run = config.run(base_problem_size, worker_count);
            report_progress(progress, &run);
            match measure_relative(executor, &run, &baseline) {
                Ok(row) => table.add_row(row),
                Err(e) => log_failure(&run, &e),
            }
        }

        table.end_group();
    }

    table
}

fn measure<E>(executor: &E, run: &RunSpec) -> Result<f64, RunFailure>
where
    E: RunExecutor + ?Sized,
{
    let output = executor.execute(run)?;
    extract_total_time(&output).ok_or(RunFailure::Extraction)
}

fn measure_baseline<E>(
    executor: &E,
    run: &RunSpec,
    baseline: &mut GroupBaseline,
) -> Result<ResultRow, RunFailure>
where
    E: RunExecutor + ?Sized,
{
    let time = measure(executor, run)?;
    let metric = baseline.record(time);
    log::info!(
        "Baseline for {} particles: time {time}, metric {metric}",
        run.base_problem_size
    );

    Ok(ResultRow {
        base_problem_size: run.base_problem_size,
        worker_count: run.worker_count,
        time,
        metric,
    })
}

fn measure_relative<E>(
    executor: &E,
    run: &RunSpec,
    baseline: &GroupBaseline,
) -> Result<ResultRow, RunFailure>
where
    E: RunExecutor + ?Sized,
{
    let unavailable = || RunFailure::BaselineUnavailable {
        base_problem_size: run.base_problem_size,
    };
    if baseline.time().is_none() {
        return Err(unavailable());
    }

    let time = measure(executor, run)?;
    let metric = baseline.metric(time).ok_or_else(unavailable)?;
    log::info!(
        "{} particles ({} simulated) on {} workers: time {time}, metric {metric}",
        run.base_problem_size,
        run.problem_size,
        run.worker_count
    );

    Ok(ResultRow {
        base_problem_size: run.base_problem_size,
        worker_count: run.worker_count,
        time,
        metric,
    })
}

fn log_failure(run: &RunSpec, failure: &RunFailure) {
    match failure {
        RunFailure::BaselineUnavailable { .. } => log::warn!(
            "Skipping {} particles on {} workers: {failure}",
            run.base_problem_size,
            run.worker_count
        ),
        _ => log::error!(
            "Run for {} particles on {} workers failed: {failure}",
            run.base_problem_size,
            run.worker_count
        ),
    }
}

fn report_progress(progress: Option<&ProgressBar>, run: &RunSpec) {
    if let Some(progress) = progress {
        progress.set_message(format!(
            "{} particles, {} workers",
            run.problem_size, run.worker_count
        ));
        progress.inc(1);
    }
}
