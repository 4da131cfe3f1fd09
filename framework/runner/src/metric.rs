/// Metric of the baseline run of a group, by definition.
pub const BASELINE_METRIC: f64 = 1.0;

/// The scaling metric of a run relative to its group's baseline time.
///
/// This is the speedup for strong scaling and the weak scaling efficiency for weak scaling. Both
/// are the plain ratio, not normalised by the worker count. A zero `measured_time` gives an
/// infinite metric.
pub fn relative_metric(baseline_time: f64, measured_time: f64) -> f64 {
    baseline_time / measured_time
}

/// Tracks the baseline time of the group that is currently being swept.
#[derive(Debug, Default)]
pub struct GroupBaseline {
    time: Option<f64>,
}

impl GroupBaseline {
    /// Start a new group, forgetting the previous group's baseline.
    pub fn reset(&mut self) {
        self.time = None;
    }

    /// Record the baseline measurement for this group and return its metric.
    pub fn record(&mut self, baseline_time: f64) -> f64 {
        self.time = Some(baseline_time);
        BASELINE_METRIC
    }

    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// The metric for a measured time, or `None` if this group has no baseline.
    pub fn metric(&self, measured_time: f64) -> Option<f64> {
        self.time
            .map(|baseline_time| relative_metric(baseline_time, measured_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_metric_is_one() {
        let mut baseline = GroupBaseline::default();
        assert_eq!(baseline.record(10.0), 1.0);
        assert_eq!(baseline.record(0.001), 1.0);
        assert_eq!(baseline.time(), Some(0.001));
    }

    #[test]
    fn relative_metric_is_exact_ratio() {
        let mut baseline = GroupBaseline::default();
        baseline.record(10.0);
        assert_eq!(baseline.metric(5.0), Some(2.0));
        assert_eq!(baseline.metric(2.5), Some(4.0));
        assert_eq!(baseline.metric(3.0), Some(10.0 / 3.0));
        assert_eq!(baseline.metric(20.0), Some(0.5));
    }

    #[test]
    fn missing_baseline_gives_no_metric() {
        let mut baseline = GroupBaseline::default();
        assert_eq!(baseline.metric(5.0), None);

        baseline.record(10.0);
        baseline.reset();
        assert_eq!(baseline.metric(5.0), None);
    }

    #[test]
    fn zero_time_is_infinite() {
        assert!(relative_metric(1.0, 0.0).is_infinite());
    }
}
