/// The scaling protocol a sweep follows.
///
/// The mode only controls two things: how the problem size of a non-baseline run is derived from
/// the group's base problem size, and how the metric column is labelled in the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ScalingMode {
    /// Fixed problem size, increasing worker count. The metric is the speedup.
    #[display("strong")]
    Strong,
    /// Problem size grows with the worker count. The metric is the weak scaling efficiency.
    #[display("weak")]
    Weak,
}

impl ScalingMode {
    /// The header of the metric column in the output table.
    pub fn metric_label(&self) -> &'static str {
        match self {
            ScalingMode::Strong => "Speedup",
            ScalingMode::Weak => "Weak Scaling Efficiency",
        }
    }

    /// The file name, without extension, that results are written to unless overridden.
    pub fn default_output_base(&self) -> &'static str {
        match self {
            ScalingMode::Strong => "output",
            ScalingMode::Weak => "omp_output_wse",
        }
    }

    /// The number of particles to simulate for `worker_count` workers in the group of
    /// `base_problem_size`.
    ///
    /// Weak scaling grows the particle count with the square root of the worker count, so that
    /// `round(base * sqrt(workers))` particles are simulated.
    pub fn problem_size(&self, base_problem_size: u64, worker_count: usize) -> u64 {
        match self {
            ScalingMode::Strong => base_problem_size,
            ScalingMode::Weak => {
                (base_problem_size as f64 * (worker_count as f64).sqrt()).round() as u64
            }
        }
    }
}
