use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PARTICLES_START: u64 = 500;
pub const DEFAULT_PARTICLES_END: u64 = 2000;

#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None, allow_negative_numbers = true)]
pub struct ScalingCli {
    /// The first and last number of particles to benchmark, given as `<start> <end>`.
    ///
    /// If either value is missing or is not a valid particle count then both fall back to the
    /// defaults of 500 and 2000. Any further values are ignored.
    #[arg(allow_hyphen_values = true)]
    pub particles: Vec<String>,

    /// How many particles to add between problem sizes
    #[clap(long, default_value_t = 100)]
    pub particles_step: u64,

    /// The number of simulation steps for every run
    #[clap(long, default_value_t = 50)]
    pub steps: u64,

    /// The first worker count to sweep after the single worker baseline
    #[clap(long, default_value_t = 2)]
    pub workers_start: usize,

    /// The last worker count to sweep, inclusive
    #[clap(long, default_value_t = 12)]
    pub workers_end: usize,

    /// Stop a single run of the simulation after this many seconds and record it as failed.
    ///
    /// By default runs are waited on until they finish.
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Directory to write the results file to. Defaults to the working directory.
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,
}

impl ScalingCli {
    /// The first and last base particle count, see [parse_particle_bounds].
    pub fn particle_bounds(&self) -> (u64, u64) {
        parse_particle_bounds(&self.particles)
    }
}

/// Read `<start> <end>` from the positional arguments.
///
/// This never fails. If either argument is missing, is not a positive integer, or the start is
/// past the end, then both bounds revert to [DEFAULT_PARTICLES_START] and [DEFAULT_PARTICLES_END].
pub fn parse_particle_bounds(args: &[String]) -> (u64, u64) {
    let defaults = (DEFAULT_PARTICLES_START, DEFAULT_PARTICLES_END);

    let parsed = match args {
        [start, end, ..] => start
            .trim()
            .parse::<u64>()
            .ok()
            .zip(end.trim().parse::<u64>().ok()),
        _ => None,
    };

    match parsed {
        Some((start, end)) if start >= 1 && start <= end => (start, end),
        _ if args.is_empty() => defaults,
        _ => {
            log::warn!(
                "Could not use particle bounds {args:?}, using defaults {} to {}",
                defaults.0,
                defaults.1
            );
            defaults
        }
    }
}
