mod binary;
mod cli;
mod definition;
mod executor;
mod extract;
mod init;
mod metric;
mod mode;
mod output;
mod progress;
mod run;
mod sweep;
mod table;
mod types;

pub mod prelude {
    pub use crate::binary::{SPH_EXECUTABLE_PATH_ENV, SPH_MPIRUN_PATH_ENV};
    pub use crate::cli::{ScalingCli, DEFAULT_PARTICLES_END, DEFAULT_PARTICLES_START};
    pub use crate::definition::SweepDefinitionBuilder;
    pub use crate::executor::{
        ExecutionFailure, Invocation, Launcher, ProcessExecutor, RunExecutor, RunOutcome,
        OMP_NUM_THREADS_ENV,
    };
    pub use crate::extract::{extract_total_time, TOTAL_TIME_MARKER};
    pub use crate::init::init;
    pub use crate::metric::{relative_metric, GroupBaseline, BASELINE_METRIC};
    pub use crate::mode::ScalingMode;
    pub use crate::output::{OutputWriter, OUTPUT_EXTENSION};
    pub use crate::run::{run, run_sweep, RunFailure};
    pub use crate::sweep::{
        ProblemSizes, RunSpec, SweepConfig, SweepConfigError, BASELINE_WORKER_COUNT,
    };
    pub use crate::table::{
        ResultRow, ResultTable, TableEntry, PARTICLES_COLUMN, PROCESSES_COLUMN, TIME_COLUMN,
    };
    pub use crate::types::ScalingResult;
}
