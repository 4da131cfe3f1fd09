use std::path::Path;

use polars::prelude::*;
use sph_scaling_runner::prelude::{
    ScalingMode, PARTICLES_COLUMN, PROCESSES_COLUMN, TIME_COLUMN,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No scaling metric column in results, found columns: {found:?}")]
    NoMetricColumn { found: Vec<String> },
    #[error("Missing column '{column}' in results")]
    MissingColumn { column: &'static str },
}

const MODES: [ScalingMode; 2] = [ScalingMode::Strong, ScalingMode::Weak];

/// Work out which scaling mode wrote `frame` from its metric column header.
pub(crate) fn detect_mode(frame: &DataFrame) -> Result<ScalingMode, LoadError> {
    let names = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    for column in [PARTICLES_COLUMN, PROCESSES_COLUMN, TIME_COLUMN] {
        if !names.iter().any(|name| name == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    MODES
        .into_iter()
        .find(|mode| names.iter().any(|name| name == mode.metric_label()))
        .ok_or(LoadError::NoMetricColumn { found: names })
}

/// Load a results file written by a scaling scenario.
///
/// Group separator rows are dropped, so every row of the returned frame is a measured run. Columns
/// are cast to their numeric types because a file with no measured runs has nothing to infer
/// them from.
pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<(ScalingMode, DataFrame)> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let mode = detect_mode(&frame)?;

    let frame = frame
        .lazy()
        .with_columns([
            col(PARTICLES_COLUMN).cast(DataType::Int64),
            col(PROCESSES_COLUMN).cast(DataType::Int64),
            col(TIME_COLUMN).cast(DataType::Float64),
            col(mode.metric_label()).cast(DataType::Float64),
        ])
        .filter(col(PARTICLES_COLUMN).is_not_null())
        .collect()?;

    Ok((mode, frame))
}
