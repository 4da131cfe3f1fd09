use std::cell::RefCell;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sph_scaling_runner::prelude::{
    run, run_sweep, ExecutionFailure, Launcher, OutputWriter, ResultRow, ResultTable, RunOutcome,
    RunSpec, ScalingCli, ScalingMode, SweepConfig, SweepDefinitionBuilder, TableEntry,
    SPH_EXECUTABLE_PATH_ENV,
};

fn sweep_config(mode: ScalingMode) -> SweepConfig {
    SweepConfig {
        problem_size_start: 500,
        problem_size_end: 600,
        problem_size_step: 100,
        step_count: 50,
        worker_count_start: 2,
        worker_count_end: 3,
        mode,
    }
}

fn halving_simulation(run: &RunSpec) -> RunOutcome {
    let time = match run.worker_count {
        1 => "10.0",
        2 => "5.0",
        3 => "2.5",
        _ => "1.0",
    };
    Ok(format!(
        "SPH with {} particles\nTotal Time: {time}\nDone\n",
        run.problem_size
    ))
}

fn row(base_problem_size: u64, worker_count: usize, time: f64, metric: f64) -> TableEntry {
    TableEntry::Row(ResultRow {
        base_problem_size,
        worker_count,
        time,
        metric,
    })
}

#[test]
fn strong_scaling_sweep_computes_speedup_per_group() {
    env_logger::try_init().ok();

    let table = run_sweep(
        &sweep_config(ScalingMode::Strong),
        &halving_simulation,
        None,
    );

    assert_eq!(
        table.entries(),
        &[
            row(500, 1, 10.0, 1.0),
            row(500, 2, 5.0, 2.0),
            row(500, 3, 2.5, 4.0),
            TableEntry::Separator,
            row(600, 1, 10.0, 1.0),
            row(600, 2, 5.0, 2.0),
            row(600, 3, 2.5, 4.0),
            TableEntry::Separator,
        ]
    );
}

#[test]
fn weak_scaling_records_base_problem_size() {
    let simulated = RefCell::new(Vec::new());
    // More workers on a proportionally larger problem take longer, so efficiency drops.
    let executor = |run: &RunSpec| -> RunOutcome {
        simulated.borrow_mut().push(run.problem_size);
        let time = match run.worker_count {
            1 => "8.0",
            2 => "10.0",
            _ => "16.0",
        };
        Ok(format!("Total Time: {time}\n"))
    };

    let table = run_sweep(&sweep_config(ScalingMode::Weak), &executor, None);

    assert_eq!(simulated.into_inner(), vec![500, 707, 866, 600, 849, 1039]);
    assert_eq!(
        table.entries(),
        &[
            row(500, 1, 8.0, 1.0),
            row(500, 2, 10.0, 0.8),
            row(500, 3, 16.0, 0.5),
            TableEntry::Separator,
            row(600, 1, 8.0, 1.0),
            row(600, 2, 10.0, 0.8),
            row(600, 3, 16.0, 0.5),
            TableEntry::Separator,
        ]
    );
}

#[test]
fn output_without_time_contributes_no_row() {
    let executor = |run: &RunSpec| -> RunOutcome {
        if run.worker_count == 2 {
            Ok("Foo\nBar\n".to_string())
        } else {
            halving_simulation(run)
        }
    };

    let table = run_sweep(&sweep_config(ScalingMode::Strong), &executor, None);

    assert_eq!(
        table.entries(),
        &[
            row(500, 1, 10.0, 1.0),
            row(500, 3, 2.5, 4.0),
            TableEntry::Separator,
            row(600, 1, 10.0, 1.0),
            row(600, 3, 2.5, 4.0),
            TableEntry::Separator,
        ]
    );
}

#[test]
fn failed_baseline_empties_only_its_group() {
    let executor = |run: &RunSpec| -> RunOutcome {
        if run.base_problem_size == 600 && run.worker_count == 1 {
            Err(ExecutionFailure::Timeout {
                command: "mpirun -n 1 ./mpi-sph.o 600 50".to_string(),
                timeout: Duration::from_secs(60),
            })
        } else {
            halving_simulation(run)
        }
    };

    let table = run_sweep(&sweep_config(ScalingMode::Strong), &executor, None);

    assert_eq!(
        table.entries(),
        &[
            row(500, 1, 10.0, 1.0),
            row(500, 2, 5.0, 2.0),
            row(500, 3, 2.5, 4.0),
            TableEntry::Separator,
            TableEntry::Separator,
        ]
    );
}

#[test]
fn every_run_failing_still_writes_a_table() {
    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let executor = |_: &RunSpec| -> RunOutcome { Ok(String::new()) };

    let table = run_sweep(&sweep_config(ScalingMode::Weak), &executor, None);
    assert_eq!(table.row_count(), 0);

    let path = OutputWriter::new(dir.path(), "omp_output_wse")
        .write(&table, ScalingMode::Weak)
        .expect("failed to write");
    let content = std::fs::read_to_string(path).expect("failed to read results");
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![
            "Num. Particles,Num. Processes,Time,Weak Scaling Efficiency",
            ",,,",
            ",,,"
        ]
    );
}

#[test]
fn writing_twice_keeps_both_results() {
    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let writer = OutputWriter::new(dir.path(), "output");
    let table = run_sweep(
        &sweep_config(ScalingMode::Strong),
        &halving_simulation,
        None,
    );

    let first = writer
        .write(&table, ScalingMode::Strong)
        .expect("failed to write");
    let second = writer
        .write(&ResultTable::new(), ScalingMode::Strong)
        .expect("failed to write");

    assert_ne!(first, second);
    assert!(std::fs::read_to_string(&first)
        .expect("failed to read first results")
        .contains("500,3,2.5,4.0"));
}

#[cfg(unix)]
#[test]
fn run_drives_simulation_process_end_to_end() {
    use clap::Parser as _;
    use std::os::unix::fs::PermissionsExt as _;

    let dir = tempfile::TempDir::new().expect("failed to create temp dir");
    let stub = dir.path().join("omp-sph-stub.sh");
    std::fs::write(
        &stub,
        "#!/bin/sh\necho \"particles $1 steps $2\"\necho \"Total Time: $OMP_NUM_THREADS.0\"\n",
    )
    .expect("failed to write stub");
    let mut perms = std::fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).unwrap();
    std::env::set_var(SPH_EXECUTABLE_PATH_ENV, &stub);

    let output_dir = dir.path().join("results");
    std::fs::create_dir(&output_dir).expect("failed to create output dir");
    let cli = ScalingCli::try_parse_from([
        "omp_strong_scaling",
        "100",
        "200",
        "--workers-end",
        "2",
        "--steps",
        "5",
        "--timeout",
        "30",
        "--no-progress",
        "--output-dir",
        output_dir.to_str().unwrap(),
    ])
    .expect("failed to parse cli");

    let scenario = SweepDefinitionBuilder::new("omp_strong_scaling", ScalingMode::Strong, cli)
        .with_launcher(Launcher::OpenMp)
        .with_output_base("output");

    let path = run(scenario).expect("sweep failed");
    assert_eq!(path, output_dir.join("output.csv"));

    // Thread count 1 takes 1.0, thread count 2 takes 2.0, so the speedup is a slowdown.
    let content = std::fs::read_to_string(&path).expect("failed to read results");
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![
            "Num. Particles,Num. Processes,Time,Speedup",
            "100,1,1.0,1.0",
            "100,2,2.0,0.5",
            ",,,",
            "200,1,1.0,1.0",
            "200,2,2.0,0.5",
            ",,,",
        ]
    );
}
