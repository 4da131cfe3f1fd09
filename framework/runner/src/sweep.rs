use std::ops::RangeInclusive;

use crate::mode::ScalingMode;

/// Worker count of the baseline run in every group.
pub const BASELINE_WORKER_COUNT: usize = 1;

/// The bounds of a scaling sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub problem_size_start: u64,
    pub problem_size_end: u64,
    pub problem_size_step: u64,
    /// Number of simulation steps passed to every run.
    pub step_count: u64,
    pub worker_count_start: usize,
    pub worker_count_end: usize,
    pub mode: ScalingMode,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SweepConfigError {
    #[error("Problem size start {start} is greater than problem size end {end}")]
    ProblemSizeBounds { start: u64, end: u64 },
    #[error("Problem sizes must be at least 1")]
    ZeroProblemSize,
    #[error("Problem size step must be at least 1")]
    ZeroProblemSizeStep,
    #[error("Step count must be at least 1")]
    ZeroStepCount,
    #[error("Worker count start must be at least 1")]
    ZeroWorkerCount,
    #[error("Worker count start {start} is greater than worker count end {end}")]
    WorkerCountBounds { start: usize, end: usize },
}

/// One invocation of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpec {
    /// The base problem size of the group this run belongs to.
    pub base_problem_size: u64,
    /// The number of particles actually simulated, derived from the base size by the mode.
    pub problem_size: u64,
    pub worker_count: usize,
    pub step_count: u64,
}

impl RunSpec {
    pub fn is_baseline(&self) -> bool {
        self.worker_count == BASELINE_WORKER_COUNT
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), SweepConfigError> {
        if self.problem_size_start == 0 {
            return Err(SweepConfigError::ZeroProblemSize);
        }
        if self.problem_size_start > self.problem_size_end {
            return Err(SweepConfigError::ProblemSizeBounds {
                start: self.problem_size_start,
                end: self.problem_size_end,
            });
        }
        if self.problem_size_step == 0 {
            return Err(SweepConfigError::ZeroProblemSizeStep);
        }
        if self.step_count == 0 {
            return Err(SweepConfigError::ZeroStepCount);
        }
        if self.worker_count_start == 0 {
            return Err(SweepConfigError::ZeroWorkerCount);
        }
        if self.worker_count_start > self.worker_count_end {
            return Err(SweepConfigError::WorkerCountBounds {
                start: self.worker_count_start,
                end: self.worker_count_end,
            });
        }

        Ok(())
    }

    /// The base problem sizes of the sweep, one per group.
    ///
    /// The upper bound is inclusive with a one step tolerance: sizes are produced while they are
    /// below `end + step`, so with `start = 500, end = 650, step = 100` the sizes are
    /// `500, 600, 700`. Every call returns a fresh iterator.
    pub fn problem_sizes(&self) -> ProblemSizes {
        ProblemSizes {
            next: Some(self.problem_size_start),
            bound: self.problem_size_end.saturating_add(self.problem_size_step),
            step: self.problem_size_step,
        }
    }

    /// The swept worker counts of every group.
    ///
    /// The baseline worker count is never part of this range, it is run separately at the start
    /// of each group.
    pub fn worker_counts(&self) -> RangeInclusive<usize> {
        self.worker_count_start.max(BASELINE_WORKER_COUNT + 1)..=self.worker_count_end
    }

    pub fn baseline_run(&self, base_problem_size: u64) -> RunSpec {
        self.run(base_problem_size, BASELINE_WORKER_COUNT)
    }

    pub fn run(&self, base_problem_size: u64, worker_count: usize) -> RunSpec {
        RunSpec {
            base_problem_size,
            problem_size: self.mode.problem_size(base_problem_size, worker_count),
            worker_count,
            step_count: self.step_count,
        }
    }

    /// Number of simulation invocations the whole sweep plans, baselines included.
    pub fn total_runs(&self) -> u64 {
        let per_group = 1 + self.worker_counts().count() as u64;
        self.problem_sizes().count() as u64 * per_group
    }
}

/// Lazy sequence of base problem sizes, see [SweepConfig::problem_sizes].
#[derive(Debug, Clone)]
pub struct ProblemSizes {
    next: Option<u64>,
    bound: u64,
    step: u64,
}

impl Iterator for ProblemSizes {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|size| *size < self.bound)?;
        self.next = current.checked_add(self.step);
        Some(current)
    }
}
