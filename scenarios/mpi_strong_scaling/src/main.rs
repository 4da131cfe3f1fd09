use sph_scaling_runner::prelude::*;

fn main() -> ScalingResult<()> {
    let builder = SweepDefinitionBuilder::new(env!("CARGO_PKG_NAME"), ScalingMode::Strong, init())
        .with_launcher(Launcher::Mpi)
        .with_default_executable("./mpi-sph.o")
        .with_output_base("mpi_output");

    run(builder)?;

    Ok(())
}
