use sph_scaling_runner::prelude::*;

fn main() -> ScalingResult<()> {
    let builder = SweepDefinitionBuilder::new(env!("CARGO_PKG_NAME"), ScalingMode::Strong, init())
        .with_launcher(Launcher::OpenMp)
        .with_default_executable("./omp-sph.o")
        .with_output_base("output");

    run(builder)?;

    Ok(())
}
