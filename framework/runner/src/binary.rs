use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::types::ScalingResult;

/// Environment variable to override the path to the SPH simulation executable.
pub const SPH_EXECUTABLE_PATH_ENV: &str = "SPH_EXECUTABLE_PATH";

/// Environment variable to override the path to the `mpirun` launcher.
pub const SPH_MPIRUN_PATH_ENV: &str = "SPH_MPIRUN_PATH";

/// Get the path to the simulation executable.
///
/// If the [`SPH_EXECUTABLE_PATH_ENV`] environment variable is set, its value is used and must
/// point to an existing file. Otherwise `default` is used as given.
pub fn executable_path(default: &Path) -> ScalingResult<PathBuf> {
    resolve_executable(env::var(SPH_EXECUTABLE_PATH_ENV).ok().as_deref(), default)
}

fn resolve_executable(configured: Option<&str>, default: &Path) -> ScalingResult<PathBuf> {
    match configured {
        Some("") => {
            bail!("'{SPH_EXECUTABLE_PATH_ENV}' set to empty string");
        }
        Some(path) => {
            let executable = PathBuf::from(path);
            if !executable.exists() {
                bail!(
                    "Path to the simulation overwritten with '{SPH_EXECUTABLE_PATH_ENV}={path}' but that path doesn't exist",
                    path = executable.display()
                );
            }
            Ok(executable)
        }
        None => {
            if !default.exists() {
                // Every run will fail and be logged, which still produces an (empty) table.
                log::warn!(
                    "Simulation executable '{}' not found, set '{SPH_EXECUTABLE_PATH_ENV}' to override",
                    default.display()
                );
            }
            Ok(default.to_path_buf())
        }
    }
}

/// Get the path to the `mpirun` launcher.
///
/// If the [`SPH_MPIRUN_PATH_ENV`] environment variable is set, its value is used and must point to
/// an existing file. Otherwise `mpirun` is looked up in the user's `PATH`. If it is not found there,
/// plain `mpirun` is returned so that each MPI run fails on its own and the sweep still writes its
/// (empty) table.
pub fn mpirun_path() -> ScalingResult<PathBuf> {
    resolve_mpirun(
        env::var(SPH_MPIRUN_PATH_ENV).ok().as_deref(),
        env::var_os("PATH"),
    )
}

fn resolve_mpirun(
    configured: Option<&str>,
    search_paths: Option<OsString>,
) -> ScalingResult<PathBuf> {
    match configured {
        Some("") => {
            bail!("'{SPH_MPIRUN_PATH_ENV}' set to empty string");
        }
        Some("mpirun") | None => {
            log::debug!("'{SPH_MPIRUN_PATH_ENV}' is not a path so looking in user's 'PATH'");
            match which::which_in("mpirun", search_paths, ".") {
                Ok(mpirun) => Ok(mpirun),
                Err(e) => {
                    log::warn!(
                        "mpirun not found in PATH ({e}), every MPI run will fail. Please install an MPI implementation or set '{SPH_MPIRUN_PATH_ENV}' to the correct path."
                    );
                    Ok(PathBuf::from("mpirun"))
                }
            }
        }
        Some(path) => {
            let mpirun = PathBuf::from(path);
            if !mpirun.exists() {
                bail!(
                    "Path to mpirun overwritten with '{SPH_MPIRUN_PATH_ENV}={path}' but that path doesn't exist",
                    path = mpirun.display()
                );
            }
            Ok(mpirun)
        }
    }
}
