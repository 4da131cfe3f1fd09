/// Recommended error type for scenario `main` functions and any setup code around a sweep. Per-run
/// failures are not reported through this type, see [crate::run::RunFailure].
pub type ScalingResult<T> = anyhow::Result<T>;
