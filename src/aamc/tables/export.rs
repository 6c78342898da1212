use crate::aamc::tables::demographic::{demographic_columns, demographic_totals_columns};
use crate::aamc::tables::merge::detail_columns;
use crate::aamc::tables::model::{
    CycleMetrics, DemographicRecord, DemographicTotals, Ethnicity, EthnicityCounts, MergedTable,
    Metric, TableKind, TotalsTable,
};
use crate::aamc::tables::totals::totals_columns;

/// A single output value. Absent values are written as blank cells.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Empty,
    Text(String),
    Integer(u64),
    Float(f64),
}

impl ExportCell {
    /// Text form used by the CSV writer.
    pub fn render(&self) -> String {
        match self {
            ExportCell::Empty => String::new(),
            ExportCell::Text(value) => value.clone(),
            ExportCell::Integer(value) => value.to_string(),
            ExportCell::Float(value) => value.to_string(),
        }
    }
}

impl From<Option<u64>> for ExportCell {
    fn from(value: Option<u64>) -> Self {
        value.map(ExportCell::Integer).unwrap_or(ExportCell::Empty)
    }
}

impl From<Option<f64>> for ExportCell {
    fn from(value: Option<f64>) -> Self {
        value.map(ExportCell::Float).unwrap_or(ExportCell::Empty)
    }
}

/// A named table ready to be written as one CSV file or one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<ExportCell>>,
}

/// Output name of a merged school table, e.g. `AAMC A-1 Merged`.
pub fn merged_name(kind: TableKind) -> String {
    format!("AAMC {} Merged", kind.label())
}

/// Output name of a totals table, e.g. `AAMC A-1 Totals Merged`.
pub fn totals_name(kind: TableKind) -> String {
    format!("AAMC {} Totals Merged", kind.label())
}

fn metric_cells(metrics: &CycleMetrics) -> impl Iterator<Item = ExportCell> + '_ {
    Metric::ALL
        .into_iter()
        .map(move |metric| ExportCell::from(metrics.get(metric)))
}

fn count_cells(counts: &EthnicityCounts) -> impl Iterator<Item = ExportCell> + '_ {
    Ethnicity::ALL
        .into_iter()
        .map(move |category| ExportCell::from(counts.get(category)))
        .chain(std::iter::once(ExportCell::from(counts.total)))
}

pub fn merged_sheet(table: &MergedTable) -> SheetTable {
    let rows = table
        .rows
        .iter()
        .map(|record| {
            let mut cells = vec![
                ExportCell::Integer(record.cycle_year.into()),
                ExportCell::Text(record.state.clone()),
                ExportCell::Text(record.school.clone()),
            ];
            cells.extend(metric_cells(&record.metrics));
            cells
        })
        .collect();

    SheetTable {
        name: merged_name(table.kind),
        columns: detail_columns(),
        rows,
    }
}

pub fn totals_sheet(table: &TotalsTable) -> SheetTable {
    let rows = table
        .rows
        .iter()
        .map(|record| {
            let mut cells = vec![
                ExportCell::Integer(record.cycle_year.into()),
                ExportCell::Integer(record.applicants),
            ];
            cells.extend(metric_cells(&record.metrics));
            cells.push(record.applications_per_applicant.into());
            cells.push(record.matriculant_applicant_percent.into());
            cells
        })
        .collect();

    SheetTable {
        name: totals_name(table.kind),
        columns: totals_columns(),
        rows,
    }
}

pub fn demographic_sheet(records: &[DemographicRecord]) -> SheetTable {
    let rows = records
        .iter()
        .map(|record| {
            let mut cells = vec![
                ExportCell::Text(record.region.clone()),
                ExportCell::Text(record.state.clone()),
            ];
            cells.extend(count_cells(&record.counts));
            cells.push(ExportCell::Integer(record.year.into()));
            cells.push(ExportCell::Text(record.apsa_region.label().to_string()));
            cells
        })
        .collect();

    SheetTable {
        name: merged_name(TableKind::A10),
        columns: demographic_columns(),
        rows,
    }
}

pub fn demographic_totals_sheet(totals: &[DemographicTotals]) -> SheetTable {
    let rows = totals
        .iter()
        .map(|total| {
            let mut cells = vec![
                ExportCell::Text(total.region.clone()),
                ExportCell::Text(total.state.clone()),
            ];
            cells.extend(count_cells(&total.counts));
            cells.push(ExportCell::Integer(total.year.into()));
            cells
        })
        .collect();

    SheetTable {
        name: totals_name(TableKind::A10),
        columns: demographic_totals_columns(),
        rows,
    }
}
