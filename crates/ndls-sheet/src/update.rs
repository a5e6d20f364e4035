//! Row-by-row update of a standards table.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use ndls_client::{Checker, StandardApi};
use ndls_model::StandardRecord;

use crate::error::{Result, SheetError};
use crate::table::CsvTable;

/// Required input column holding the standard numbers.
pub const STANDARD_NO_COLUMN: &str = "标准号";
/// Output column: status label.
pub const STATUS_COLUMN: &str = "ndls状态";
/// Output column: query timestamp.
pub const QUERIED_AT_COLUMN: &str = "ndls查询时间";
/// Output column: comma-joined replacement numbers.
pub const REPLACEMENT_NO_COLUMN: &str = "替代标准号";
/// Output column: comma-joined replacement titles.
pub const REPLACEMENT_NAME_COLUMN: &str = "替代标准名";

/// Per-run accounting for the CLI summary and exit-code policy.
#[derive(Debug, Default)]
pub struct UpdateSummary {
    /// Rows in the input table.
    pub rows: usize,
    /// Rows whose standard number was queried.
    pub queried: usize,
    /// Rows skipped for a blank standard number.
    pub skipped: usize,
    /// Queries that failed outright (network/service errors).
    pub failed: usize,
    /// Rows whose standard is superseded.
    pub superseded: usize,
    /// Status label histogram over the queried rows.
    pub status_counts: BTreeMap<String, usize>,
}

/// Update the table at `input` and write the result to `output`.
///
/// The required-column check happens before any service call. Every
/// pre-existing column, row, and their order are preserved; only the four
/// result columns are added (or overwritten when already present). Rows
/// with a blank standard number keep empty result cells and cost no
/// service call.
///
/// The observer receives `(sequence, total, record)` per queried row, for
/// progress reporting.
pub fn update_sheet<A, F>(
    checker: &Checker<A>,
    input: &Path,
    output: &Path,
    mut observer: F,
) -> Result<UpdateSummary>
where
    A: StandardApi,
    F: FnMut(usize, usize, &StandardRecord),
{
    let mut table = CsvTable::read(input)?;
    let Some(no_index) = table.column_index(STANDARD_NO_COLUMN) else {
        return Err(SheetError::MissingColumn {
            column: STANDARD_NO_COLUMN.to_string(),
            path: input.to_path_buf(),
        });
    };

    let status_index = table.ensure_column(STATUS_COLUMN);
    let queried_at_index = table.ensure_column(QUERIED_AT_COLUMN);
    let replacement_no_index = table.ensure_column(REPLACEMENT_NO_COLUMN);
    let replacement_name_index = table.ensure_column(REPLACEMENT_NAME_COLUMN);

    let mut summary = UpdateSummary {
        rows: table.rows.len(),
        ..UpdateSummary::default()
    };

    let pending: Vec<(usize, String)> = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let standard_no = row[no_index].trim();
            (!standard_no.is_empty()).then(|| (index, standard_no.to_string()))
        })
        .collect();
    summary.skipped = summary.rows - pending.len();

    let total = pending.len();
    let numbers: Vec<String> = pending.iter().map(|(_, no)| no.clone()).collect();
    let records = checker.query_batch_with(&numbers, |sequence, record| {
        observer(sequence, total, record);
    });

    for ((row_index, _), record) in pending.iter().zip(&records) {
        let row = &mut table.rows[*row_index];
        row[status_index] = record.status.label().to_string();
        row[queried_at_index] = record.queried_at.clone();
        row[replacement_no_index] = record.replacement_nos();
        row[replacement_name_index] = record.replacement_names();

        summary.queried += 1;
        if record.failed() {
            summary.failed += 1;
        }
        if record.status.is_superseded() {
            summary.superseded += 1;
        }
        *summary
            .status_counts
            .entry(record.status.label().to_string())
            .or_insert(0) += 1;
    }

    table.write(output)?;
    info!(
        rows = summary.rows,
        queried = summary.queried,
        failed = summary.failed,
        output = %output.display(),
        "table updated"
    );
    Ok(summary)
}
