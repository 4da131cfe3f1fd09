use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::Context;

use crate::binary::mpirun_path;
use crate::sweep::RunSpec;
use crate::types::ScalingResult;

/// Environment variable read by the shared memory simulation for its thread count.
pub const OMP_NUM_THREADS_ENV: &str = "OMP_NUM_THREADS";

/// How the requested parallelism is passed to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Launcher {
    /// Start `worker_count` processes with `mpirun -n <worker_count>`.
    #[display("mpi")]
    Mpi,
    /// Run a single process with [OMP_NUM_THREADS_ENV] set to the worker count.
    #[display("openmp")]
    OpenMp,
}

/// Why a simulation run produced no usable output.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionFailure {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed waiting for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Standard output of a successful run, or why the run failed.
pub type RunOutcome = Result<String, ExecutionFailure>;

/// Runs the simulation for one point of a sweep.
///
/// Implemented by [ProcessExecutor] for real runs. Any `Fn(&RunSpec) -> RunOutcome` is also an
/// executor, which is handy for driving a sweep without the simulation.
pub trait RunExecutor {
    fn execute(&self, run: &RunSpec) -> RunOutcome;
}

impl<F> RunExecutor for F
where
    F: Fn(&RunSpec) -> RunOutcome,
{
    fn execute(&self, run: &RunSpec) -> RunOutcome {
        self(run)
    }
}

/// A fully resolved command line for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl Invocation {
    /// `mpirun -n <workers> <executable> <particles> <steps>`
    pub fn mpi(mpirun: &Path, executable: &Path, run: &RunSpec) -> Self {
        Self {
            program: mpirun.to_path_buf(),
            args: vec![
                "-n".to_string(),
                run.worker_count.to_string(),
                executable.display().to_string(),
                run.problem_size.to_string(),
                run.step_count.to_string(),
            ],
            envs: Vec::new(),
        }
    }

    /// `OMP_NUM_THREADS=<workers> <executable> <particles> <steps>`
    pub fn openmp(executable: &Path, run: &RunSpec) -> Self {
        Self {
            program: executable.to_path_buf(),
            args: vec![run.problem_size.to_string(), run.step_count.to_string()],
            envs: vec![(OMP_NUM_THREADS_ENV.to_string(), run.worker_count.to_string())],
        }
    }

    fn command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child on timeout or error must not leave the simulation running.
            .kill_on_drop(true);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{key}={value} ")?;
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum Launch {
    Mpi { mpirun: PathBuf },
    OpenMp,
}

/// Runs the simulation as a child process, one at a time.
#[derive(Debug)]
pub struct ProcessExecutor {
    runtime: tokio::runtime::Runtime,
    launch: Launch,
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    /// Create an executor for `executable`.
    ///
    /// For [Launcher::Mpi] the `mpirun` launcher is resolved here, see [mpirun_path]. Without a
    /// `timeout` every run is waited on until it exits by itself.
    pub fn new(
        launcher: Launcher,
        executable: PathBuf,
        timeout: Option<Duration>,
    ) -> ScalingResult<Self> {
        let launch = match launcher {
            Launcher::Mpi => Launch::Mpi {
                mpirun: mpirun_path()?,
            },
            Launcher::OpenMp => Launch::OpenMp,
        };

        Ok(Self {
            runtime: tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?,
            launch,
            executable,
            timeout,
        })
    }

    pub fn invocation(&self, run: &RunSpec) -> Invocation {
        match &self.launch {
            Launch::Mpi { mpirun } => Invocation::mpi(mpirun, &self.executable, run),
            Launch::OpenMp => Invocation::openmp(&self.executable, run),
        }
    }
}

impl RunExecutor for ProcessExecutor {
    /// Run in place, blocking until the child exits or the timeout elapses.
    fn execute(&self, run: &RunSpec) -> RunOutcome {
        let invocation = self.invocation(run);
        log::info!("Running command: {invocation}");

        self.runtime
            .block_on(run_to_completion(&invocation, self.timeout))
    }
}

async fn run_to_completion(invocation: &Invocation, timeout: Option<Duration>) -> RunOutcome {
    let child = invocation
        .command()
        .spawn()
        .map_err(|source| ExecutionFailure::Spawn {
            command: invocation.to_string(),
            source,
        })?;
    log::debug!("Started simulation with PID: {:?}", child.id());

    let wait = child.wait_with_output();
    let output = match timeout {
        Some(timeout) => tokio::time::timeout(timeout, wait).await.map_err(|_| {
            ExecutionFailure::Timeout {
                command: invocation.to_string(),
                timeout,
            }
        })?,
        None => wait.await,
    }
    .map_err(|source| ExecutionFailure::Wait {
        command: invocation.to_string(),
        source,
    })?;

    log::debug!("Simulation finished with status: {}", output.status);
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(ExecutionFailure::NonZeroExit {
            command: invocation.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
