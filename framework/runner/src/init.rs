use crate::cli::ScalingCli;
use clap::Parser;

/// Initialise the CLI and logging for a scaling scenario.
pub fn init() -> ScalingCli {
    env_logger::init();

    ScalingCli::parse()
}
