use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::cli::ScalingCli;
use crate::executor::Launcher;
use crate::mode::ScalingMode;
use crate::sweep::SweepConfig;
use crate::types::ScalingResult;

/// The builder for a sweep definition.
///
/// This must be used at the start of a scenario to define the sweep that you want to run.
pub struct SweepDefinitionBuilder {
    /// The name of the scenario.
    ///
    /// Recommended value is `env!("CARGO_PKG_NAME")`.
    name: String,
    /// Command line options, usually from [crate::init::init].
    cli: ScalingCli,
    /// The scaling protocol to follow.
    mode: ScalingMode,
    /// How parallelism is requested from the simulation. Defaults to [Launcher::Mpi].
    launcher: Launcher,
    /// The simulation to run unless overridden with [crate::binary::SPH_EXECUTABLE_PATH_ENV].
    default_executable: PathBuf,
    /// The results file name without extension. Defaults to [ScalingMode::default_output_base].
    output_base: Option<String>,
}

#[derive(Debug)]
pub struct SweepDefinition {
    pub name: String,
    pub config: SweepConfig,
    pub launcher: Launcher,
    pub default_executable: PathBuf,
    pub timeout: Option<Duration>,
    pub output_dir: PathBuf,
    pub output_base: String,
    pub no_progress: bool,
}

impl SweepDefinitionBuilder {
    pub fn new(name: &str, mode: ScalingMode, cli: ScalingCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            mode,
            launcher: Launcher::Mpi,
            default_executable: PathBuf::from("./mpi-sph.o"),
            output_base: None,
        }
    }

    /// Set the [SweepDefinitionBuilder::launcher] for this sweep.
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Set the [SweepDefinitionBuilder::default_executable] for this sweep.
    pub fn with_default_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.default_executable = executable.into();
        self
    }

    /// Set the [SweepDefinitionBuilder::output_base] for this sweep.
    pub fn with_output_base(mut self, output_base: &str) -> Self {
        self.output_base = Some(output_base.to_string());
        self
    }

    pub(crate) fn build(self) -> ScalingResult<SweepDefinition> {
        let (problem_size_start, problem_size_end) = self.cli.particle_bounds();

        let config = SweepConfig {
            problem_size_start,
            problem_size_end,
            problem_size_step: self.cli.particles_step,
            step_count: self.cli.steps,
            worker_count_start: self.cli.workers_start,
            worker_count_end: self.cli.workers_end,
            mode: self.mode,
        };
        config
            .validate()
            .with_context(|| format!("Invalid sweep configuration for {}", self.name))?;

        Ok(SweepDefinition {
            name: self.name,
            config,
            launcher: self.launcher,
            default_executable: self.default_executable,
            timeout: self.cli.timeout.map(Duration::from_secs),
            output_dir: self.cli.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            output_base: self
                .output_base
                .unwrap_or_else(|| self.mode.default_output_base().to_string()),
            no_progress: self.cli.no_progress,
        })
    }
}
