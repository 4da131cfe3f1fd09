use anyhow::Context;
use itertools::Itertools;
use polars::frame::DataFrame;
use polars::prelude::*;
use sph_scaling_runner::prelude::{
    BASELINE_WORKER_COUNT, PARTICLES_COLUMN, PROCESSES_COLUMN, TIME_COLUMN,
};

use crate::model::{GroupPeak, StandardRatioStats};

pub(crate) fn standard_ratio_stats(
    frame: DataFrame,
    column: &str,
) -> anyhow::Result<StandardRatioStats> {
    let value_series = frame.column(column)?.as_materialized_series().clone();

    let mean = value_series.mean().context("Mean")?;
    let std = value_series.std(0).context("Std")?;
    let min = value_series
        .min::<f64>()
        .context("Min")?
        .context("Missing min")?;
    let max = value_series
        .max::<f64>()
        .context("Max")?
        .context("Missing max")?;

    Ok(StandardRatioStats {
        mean,
        std,
        min,
        max,
    })
}

/// The rows of `frame` that are not baseline runs.
pub(crate) fn without_baselines(frame: &DataFrame) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .filter(col(PROCESSES_COLUMN).neq(lit(BASELINE_WORKER_COUNT as i64)))
        .collect()
}

/// The best metric of each problem size group, ordered by particle count.
///
/// When several worker counts reach the same metric, the smallest of them is reported.
pub(crate) fn group_peaks(frame: &DataFrame, metric: &str) -> anyhow::Result<Vec<GroupPeak>> {
    let particles = frame
        .column(PARTICLES_COLUMN)?
        .as_materialized_series()
        .i64()?;
    let workers = frame
        .column(PROCESSES_COLUMN)?
        .as_materialized_series()
        .i64()?;
    let times = frame
        .column(TIME_COLUMN)?
        .as_materialized_series()
        .f64()?;
    let metrics = frame
        .column(metric)?
        .as_materialized_series()
        .f64()?;

    let groups = particles
        .into_iter()
        .zip(workers)
        .zip(times)
        .zip(metrics)
        .filter_map(|(((particles, workers), time), metric)| {
            Some((particles?, workers?, time?, metric?))
        })
        .into_group_map_by(|(particles, ..)| *particles);

    let peaks = groups
        .into_iter()
        .sorted_by_key(|(particles, _)| *particles)
        .filter_map(|(particles, runs)| {
            let baseline_time = runs
                .iter()
                .find(|(_, workers, ..)| *workers == BASELINE_WORKER_COUNT as i64)
                .map(|(_, _, time, _)| *time);

            let (_, peak_workers, _, peak_metric) = runs
                .iter()
                .max_by(|a, b| a.3.total_cmp(&b.3).then(b.1.cmp(&a.1)))
                .copied()?;

            Some(GroupPeak {
                particles,
                runs: runs.len(),
                baseline_time,
                peak_metric,
                peak_workers,
            })
        })
        .collect();

    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            PARTICLES_COLUMN => [500i64, 500, 500, 600, 600, 600],
            PROCESSES_COLUMN => [1i64, 2, 3, 1, 2, 3],
            TIME_COLUMN => [10.0, 5.0, 2.5, 12.0, 4.0, 4.0],
            "Speedup" => [1.0, 2.0, 4.0, 1.0, 3.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn peaks_per_group() {
        let peaks = group_peaks(&sample_frame(), "Speedup").unwrap();

        assert_eq!(
            peaks,
            vec![
                GroupPeak {
                    particles: 500,
                    runs: 3,
                    baseline_time: Some(10.0),
                    peak_metric: 4.0,
                    peak_workers: 3,
                },
                GroupPeak {
                    particles: 600,
                    runs: 3,
                    baseline_time: Some(12.0),
                    peak_metric: 3.0,
                    peak_workers: 2,
                },
            ]
        );
    }

    #[test]
    fn group_without_baseline() {
        let frame = df!(
            PARTICLES_COLUMN => [700i64],
            PROCESSES_COLUMN => [4i64],
            TIME_COLUMN => [2.0],
            "Speedup" => [0.5],
        )
        .unwrap();

        let peaks = group_peaks(&frame, "Speedup").unwrap();
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].baseline_time, None);
        assert_eq!(peaks[0].peak_workers, 4);
    }

    #[test]
    fn ratio_stats_ignore_baselines() {
        let frame = without_baselines(&sample_frame()).unwrap();
        assert_eq!(frame.height(), 4);

        let stats = standard_ratio_stats(frame, "Speedup").unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.std - 0.5f64.sqrt()).abs() < 1e-12);
    }
}
