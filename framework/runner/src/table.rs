use polars::prelude::*;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::mode::ScalingMode;

pub const PARTICLES_COLUMN: &str = "Num. Particles";
pub const PROCESSES_COLUMN: &str = "Num. Processes";
pub const TIME_COLUMN: &str = "Time";

/// One measured run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub base_problem_size: u64,
    pub worker_count: usize,
    pub time: f64,
    pub metric: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEntry {
    Row(ResultRow),
    /// Blank row closing a problem size group. Purely visual.
    Separator,
}

/// Results of a sweep in emission order, with a separator after each problem size group.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultTable {
    entries: Vec<TableEntry>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: ResultRow) {
        self.entries.push(TableEntry::Row(row));
    }

    /// Close the current problem size group.
    pub fn end_group(&mut self) {
        self.entries.push(TableEntry::Separator);
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// The measured rows, without separators.
    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.entries.iter().filter_map(|entry| match entry {
            TableEntry::Row(row) => Some(row),
            TableEntry::Separator => None,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Convert to a frame with the output column headers for `mode`.
    ///
    /// Separators become rows where every column is null, which render as blank rows.
    pub fn to_data_frame(&self, mode: ScalingMode) -> PolarsResult<DataFrame> {
        let len = self.entries.len();
        let mut particles = Vec::<Option<u64>>::with_capacity(len);
        let mut processes = Vec::<Option<u64>>::with_capacity(len);
        let mut times = Vec::<Option<f64>>::with_capacity(len);
        let mut metrics = Vec::<Option<f64>>::with_capacity(len);

        for entry in &self.entries {
            match entry {
                TableEntry::Row(row) => {
                    particles.push(Some(row.base_problem_size));
                    processes.push(Some(row.worker_count as u64));
                    times.push(Some(row.time));
                    metrics.push(Some(row.metric));
                }
                TableEntry::Separator => {
                    particles.push(None);
                    processes.push(None);
                    times.push(None);
                    metrics.push(None);
                }
            }
        }

        df!(
            PARTICLES_COLUMN => particles,
            PROCESSES_COLUMN => processes,
            TIME_COLUMN => times,
            mode.metric_label() => metrics,
        )
    }

    /// Render the measured rows for the terminal.
    pub fn render(&self, mode: ScalingMode) -> String {
        let mut builder = Builder::default();
        builder.push_record([
            PARTICLES_COLUMN,
            PROCESSES_COLUMN,
            TIME_COLUMN,
            mode.metric_label(),
        ]);
        for row in self.rows() {
            builder.push_record([
                row.base_problem_size.to_string(),
                row.worker_count.to_string(),
                float4(row.time),
                float4(row.metric),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }
}

fn float4(n: f64) -> String {
    format!("{:.4}", n)
}
