use std::fmt;

use crate::discover::PipelineStep;
use crate::record::StepRecord;
use crate::table;

/// Timestamp layout for report columns, the C-locale `%c` form.
const TIME_FORMAT: &str = "%c";

/// Rendered in the time, elapsed, and status columns of steps that were
/// never attempted, keeping them distinguishable from steps that ran and
/// failed.
const NOT_ATTEMPTED: &str = "NA";

const HEADERS: [&str; 6] = [
    "Order",
    "File name",
    "Start time",
    "End time",
    "Time elapsed (mins)",
    "Status",
];

/// Snapshot of a run: one row per discovered step, in execution order.
///
/// A pure projection of the runner's records; rendering or holding onto a
/// report never feeds back into the run.
#[derive(Debug, Clone)]
pub struct RunReport {
    rows: Vec<ReportRow>,
}

/// One step's projection into the report.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub order: i64,
    pub name: String,
    /// `None` until the step is attempted.
    pub outcome: Option<StepRecord>,
}

impl RunReport {
    pub(crate) fn project(steps: &[PipelineStep], records: &[Option<StepRecord>]) -> Self {
        let rows = steps
            .iter()
            .zip(records)
            .map(|(step, record)| ReportRow {
                order: step.order,
                name: step.name.clone(),
                outcome: record.clone(),
            })
            .collect();
        Self { rows }
    }

    /// The report rows, in execution order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Render the aligned summary table.
    pub fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = self.rows.iter().map(ReportRow::cells).collect();
        table::render(&HEADERS, &rows)
    }
}

impl ReportRow {
    fn cells(&self) -> Vec<String> {
        match &self.outcome {
            Some(record) => vec![
                self.order.to_string(),
                self.name.clone(),
                record.started_at.format(TIME_FORMAT).to_string(),
                record.finished_at.format(TIME_FORMAT).to_string(),
                format!("{:.2}", record.elapsed_minutes),
                if record.succeeded { "Success" } else { "Failure" }.to_owned(),
            ],
            None => vec![
                self.order.to_string(),
                self.name.clone(),
                NOT_ATTEMPTED.to_owned(),
                NOT_ATTEMPTED.to_owned(),
                NOT_ATTEMPTED.to_owned(),
                NOT_ATTEMPTED.to_owned(),
            ],
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StepTimer;

    fn steps(names: &[(i64, &str)]) -> Vec<PipelineStep> {
        names
            .iter()
            .map(|(order, name)| PipelineStep {
                order: *order,
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn unattempted_steps_render_na_in_every_outcome_column() {
        let steps = steps(&[(1, "1-a.sh")]);
        let report = RunReport::project(&steps, &[None]);
        let table = report.to_table();
        let row = table.lines().nth(3).unwrap();
        assert_eq!(row.matches("NA").count(), 4);
        assert!(row.contains("1-a.sh"));
    }

    #[test]
    fn attempted_steps_render_timing_and_status() {
        let steps = steps(&[(1, "1-ok.sh"), (2, "2-bad.py"), (3, "3-later.R")]);
        let records = vec![
            Some(StepTimer::start().finish(true)),
            Some(StepTimer::start().finish(false)),
            None,
        ];
        let report = RunReport::project(&steps, &records);
        let table = report.to_table();
        let ok = table.lines().find(|l| l.contains("1-ok.sh")).unwrap();
        let bad = table.lines().find(|l| l.contains("2-bad.py")).unwrap();
        let later = table.lines().find(|l| l.contains("3-later.R")).unwrap();
        assert!(ok.contains("Success"));
        assert!(bad.contains("Failure"));
        assert!(later.contains("NA"));
    }

    #[test]
    fn rows_keep_execution_order() {
        let steps = steps(&[(1, "1-a.sh"), (2, "2-b.py"), (10, "10-c.R")]);
        let report = RunReport::project(&steps, &[None, None, None]);
        let orders: Vec<i64> = report.rows().iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![1, 2, 10]);
    }

    #[test]
    fn table_has_the_expected_columns() {
        let report = RunReport::project(&[], &[]);
        let header = report.to_table().lines().nth(1).unwrap().to_string();
        for column in HEADERS {
            assert!(header.contains(column), "missing column {column}");
        }
    }
}
