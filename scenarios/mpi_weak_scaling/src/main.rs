use sph_scaling_runner::prelude::*;

fn main() -> ScalingResult<()> {
    // Each run grows the particle count with the square root of the process count, keeping the
    // work per process roughly constant.
    let builder = SweepDefinitionBuilder::new(env!("CARGO_PKG_NAME"), ScalingMode::Weak, init())
        .with_launcher(Launcher::Mpi)
        .with_default_executable("./mpi-sph.o")
        .with_output_base(ScalingMode::Weak.default_output_base());

    run(builder)?;

    Ok(())
}
