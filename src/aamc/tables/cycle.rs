use std::path::Path;

use tracing::{debug, info, instrument};

use crate::aamc::tables::config::{CYCLE_COLUMNS, SheetShape};
use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::io::excel_read;
use crate::aamc::tables::model::{
    Cell, CycleMetrics, CycleTable, CycleYear, RawSheet, SchoolRecord, YearTotals,
};

/// Marker identifying the totals line in the state column.
pub const TOTALS_MARKER: &str = "Total";

/// Reads one cycle spreadsheet and splits it into school rows and the
/// totals row.
#[instrument(level = "info", skip_all, fields(path = %path.display(), year = year))]
pub fn read_cycle(path: &Path, shape: &SheetShape, year: CycleYear) -> Result<CycleTable> {
    let sheet = excel_read::load_sheet(path)?;
    let table = split_cycle(&sheet, shape, year)?;
    info!(schools = table.schools.len(), "read cycle sheet");
    Ok(table)
}

/// Applies a [`SheetShape`] to an already loaded sheet.
///
/// Rows `head..foot` (0-based, i.e. the rows after the 1-based title row up
/// to and including the 1-based footer row) form the data block. The state
/// column is forward-filled, the single row whose state contains
/// [`TOTALS_MARKER`] becomes the totals row, and it must be the final row of
/// the block.
pub fn split_cycle(sheet: &RawSheet, shape: &SheetShape, year: CycleYear) -> Result<CycleTable> {
    let head = shape.head as usize;
    let foot = shape.foot as usize;
    if head == 0 || foot <= head + 1 {
        return Err(sheet.mismatch(format!(
            "footer row {foot} leaves no data rows below header row {head}"
        )));
    }
    if sheet.width() < CYCLE_COLUMNS {
        return Err(sheet.mismatch(format!(
            "expected {CYCLE_COLUMNS} columns, found {}",
            sheet.width()
        )));
    }
    if sheet.height() < foot {
        return Err(sheet.mismatch(format!(
            "footer row {foot} is past the last row {}",
            sheet.height()
        )));
    }

    let block = sheet.block(head, foot, CYCLE_COLUMNS);
    debug!(head, foot, rows = block.len(), "sliced data block");

    let mut states: Vec<Option<String>> = block.iter().map(|row| row[0].as_label()).collect();
    forward_fill(&mut states);
    let states = states
        .into_iter()
        .enumerate()
        .map(|(idx, state)| {
            state.ok_or_else(|| {
                sheet.mismatch(format!("row {} has no state to inherit", head + idx + 1))
            })
        })
        .collect::<Result<Vec<String>>>()?;

    let matches: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, state)| state.contains(TOTALS_MARKER))
        .map(|(idx, _)| idx)
        .collect();
    let last = block.len() - 1;
    match matches.as_slice() {
        [only] if *only == last => {}
        [only] => {
            return Err(sheet.mismatch(format!(
                "totals row found at row {} but the footer is row {foot}",
                head + only + 1
            )));
        }
        _ => {
            return Err(TableError::TotalsAmbiguity {
                path: sheet.path().to_path_buf(),
                matches: matches.len(),
            });
        }
    }

    let order = shape.order.metrics();
    let parse_metrics = |row: &[Cell]| -> Result<CycleMetrics> {
        let mut metrics = CycleMetrics::default();
        for (metric, cell) in order.iter().zip(&row[2..]) {
            *metrics.slot(*metric) = cell.to_count(metric.column_name())?;
        }
        Ok(metrics)
    };

    let totals = YearTotals {
        cycle_year: year,
        label: states[last].clone(),
        metrics: parse_metrics(block[last].as_slice())?,
    };

    let mut schools = Vec::with_capacity(last);
    for (idx, (row, state)) in block.iter().zip(states).take(last).enumerate() {
        let school = row[1].as_label().ok_or_else(|| {
            sheet.mismatch(format!("row {} has no school name", head + idx + 1))
        })?;
        schools.push(SchoolRecord {
            cycle_year: year,
            state,
            school,
            metrics: parse_metrics(row.as_slice())?,
        });
    }

    Ok(CycleTable { schools, totals })
}

/// Replaces every missing value with the nearest present value above it.
/// Leading missing values stay missing.
pub fn forward_fill<T: Clone>(values: &mut [Option<T>]) {
    let mut last: Option<T> = None;
    for value in values.iter_mut() {
        if value.is_some() {
            last = value.clone();
        } else {
            *value = last.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_fill_inherits_from_above() {
        let mut values = vec![Some("Alabama"), None, None, Some("Alaska"), None];
        forward_fill(&mut values);
        assert_eq!(
            values,
            vec![
                Some("Alabama"),
                Some("Alabama"),
                Some("Alabama"),
                Some("Alaska"),
                Some("Alaska")
            ]
        );

        let filled = values.clone();
        forward_fill(&mut values);
        assert_eq!(values, filled);
    }

    #[test]
    fn forward_fill_leaves_complete_columns_alone() {
        let mut values = vec![Some(1), Some(2), Some(3)];
        forward_fill(&mut values);
        assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn forward_fill_keeps_leading_gaps() {
        let mut values: Vec<Option<u8>> = vec![None, Some(4), None];
        forward_fill(&mut values);
        assert_eq!(values, vec![None, Some(4), Some(4)]);
    }
}
