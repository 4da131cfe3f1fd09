use std::sync::LazyLock;

use regex::Regex;

/// Marker the simulation prints in front of its total execution time.
pub const TOTAL_TIME_MARKER: &str = "Total Time: ";

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("Decimal pattern is valid"));

/// Find the total execution time reported in the output of a simulation run.
///
/// The first line containing [TOTAL_TIME_MARKER] is selected and the first decimal number on that
/// line is taken as the time, in whatever unit the simulation reports. Returns `None` if there is
/// no such line or the line has no decimal number on it. Later marker lines are never considered.
pub fn extract_total_time(raw_output: &str) -> Option<f64> {
    let line = raw_output
        .lines()
        .find(|line| line.contains(TOTAL_TIME_MARKER))?;

    DECIMAL.find(line)?.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_time_from_marker_line() {
        let output = "Initialising 500 particles\nStep 50 done\nTotal Time: 12.345 s\n";
        assert_eq!(extract_total_time(output), Some(12.345));
    }

    #[test]
    fn no_marker_line() {
        assert_eq!(extract_total_time("Foo\nBar\n"), None);
        assert_eq!(extract_total_time(""), None);
    }

    #[test]
    fn marker_line_without_decimal() {
        assert_eq!(extract_total_time("Total Time: 12 s\n"), None);
        assert_eq!(extract_total_time("Total Time: n/a\nTotal Time: 3.5\n"), None);
    }

    #[test]
    fn first_marker_line_wins() {
        let output = "Total Time: 1.5\nTotal Time: 2.5\n";
        assert_eq!(extract_total_time(output), Some(1.5));
    }

    #[test]
    fn first_decimal_on_line_wins() {
        let output = "rank 0.0 Total Time: 4.25 (wall 5.75)";
        assert_eq!(extract_total_time(output), Some(0.0));
    }

    #[test]
    fn marker_requires_trailing_space() {
        assert_eq!(extract_total_time("Total Time:3.0"), None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let output = "Total Time: 0.125\n";
        assert_eq!(extract_total_time(output), extract_total_time(output));
    }
}
