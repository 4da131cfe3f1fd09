use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Summary of one results file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalingSummary {
    /// The results file this summary was read from
    pub file: String,
    /// The scaling mode, `strong` or `weak`
    pub mode: String,
    /// The header of the metric column
    pub metric: String,
    /// The number of measured runs, not counting group separators
    pub runs: usize,
    /// One entry per problem size, in ascending order of particles
    pub groups: Vec<GroupPeak>,
    /// Statistics of the metric over all non-baseline runs
    ///
    /// Baseline runs always have a metric of exactly 1 so they are left out. This is `None` if
    /// there are no non-baseline runs.
    pub metric_stats: Option<StandardRatioStats>,
}

/// The best scaling observed for one problem size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Tabled)]
pub struct GroupPeak {
    #[tabled(rename = "Num. Particles")]
    pub particles: i64,
    #[tabled(rename = "Runs")]
    pub runs: usize,
    #[tabled(rename = "Baseline Time", display = "optional_float")]
    pub baseline_time: Option<f64>,
    #[tabled(rename = "Peak Metric", display = "float4")]
    pub peak_metric: f64,
    #[tabled(rename = "Peak Processes")]
    pub peak_workers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardRatioStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

fn float4(n: &f64) -> String {
    format!("{:.4}", n)
}

fn optional_float(n: &Option<f64>) -> String {
    n.map(|n| float4(&n)).unwrap_or_else(|| "-".to_string())
}
