use tracing::{info, instrument, warn};

use crate::aamc::tables::config::DemographicSource;
use crate::aamc::tables::cycle::forward_fill;
use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::io::excel_read;
use crate::aamc::tables::model::{
    Cell, CycleYear, DemographicRecord, DemographicTotals, Ethnicity, EthnicityCounts, RawSheet,
    TableKind,
};
use crate::aamc::tables::regions::region_for_state;

/// Number of columns read from an A-10 sheet.
pub const DEMOGRAPHIC_COLUMNS: usize = 13;

/// State-column labels of the per-region subtotal lines.
pub const REGION_SUBTOTALS: [&str; 2] = ["All for the Region", "Total for the Region"];

/// Column headers of the merged demographic table, in output order.
pub fn demographic_columns() -> Vec<String> {
    let mut columns = vec!["region".to_string(), "state".to_string()];
    columns.extend(count_columns());
    columns.push("year".to_string());
    columns.push("APSA_region".to_string());
    columns
}

/// Column headers of the demographic totals table, in output order.
pub fn demographic_totals_columns() -> Vec<String> {
    let mut columns = vec!["region".to_string(), "state".to_string()];
    columns.extend(count_columns());
    columns.push("year".to_string());
    columns
}

fn count_columns() -> impl Iterator<Item = String> {
    Ethnicity::ALL
        .into_iter()
        .map(|category| category.column_name().to_string())
        .chain(std::iter::once("Total".to_string()))
}

/// Reads every configured A-10 sheet in ascending year order.
pub fn merge_demographics(
    sources: &[DemographicSource],
) -> Result<(Vec<DemographicRecord>, Vec<DemographicTotals>)> {
    let mut ordered: Vec<&DemographicSource> = sources.iter().collect();
    ordered.sort_by_key(|source| source.year);
    if let Some(pair) = ordered.windows(2).find(|pair| pair[0].year == pair[1].year) {
        return Err(TableError::DuplicateYear {
            year: pair[0].year,
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }

    let mut records = Vec::new();
    let mut totals = Vec::with_capacity(ordered.len());
    for source in ordered {
        let (rows, grand_total) = read_demographics(source)
            .map_err(|error| error.in_year(TableKind::A10, source.year))?;
        records.extend(rows);
        totals.push(grand_total);
    }
    Ok((records, totals))
}

/// Reads one A-10 sheet into its state rows and its grand-total row.
#[instrument(level = "info", skip_all, fields(path = %source.path.display(), year = source.year))]
pub fn read_demographics(
    source: &DemographicSource,
) -> Result<(Vec<DemographicRecord>, DemographicTotals)> {
    let sheet = excel_read::load_sheet(&source.path)?;
    let (records, totals) = split_demographics(&sheet, source.head, source.foot, source.year)?;
    info!(states = records.len(), "read demographic sheet");
    Ok((records, totals))
}

/// Applies the A-10 layout to a loaded sheet. `head` is the 0-based row of
/// column titles; the `foot` rows below it are data and the last of them is
/// the grand total.
pub fn split_demographics(
    sheet: &RawSheet,
    head: u32,
    foot: u32,
    year: CycleYear,
) -> Result<(Vec<DemographicRecord>, DemographicTotals)> {
    let start = head as usize + 1;
    let end = start + foot as usize;
    if foot == 0 {
        return Err(sheet.mismatch("footer keeps no data rows"));
    }
    if sheet.width() < DEMOGRAPHIC_COLUMNS {
        return Err(sheet.mismatch(format!(
            "expected {DEMOGRAPHIC_COLUMNS} columns, found {}",
            sheet.width()
        )));
    }
    if sheet.height() < end {
        return Err(sheet.mismatch(format!(
            "{foot} data rows below header row {head} run past the last row {}",
            sheet.height()
        )));
    }

    let block = sheet.block(start, end, DEMOGRAPHIC_COLUMNS);
    let Some(last) = block.last() else {
        return Err(sheet.mismatch("footer keeps no data rows"));
    };
    let totals = DemographicTotals {
        year,
        region: last[0].as_label().unwrap_or_default(),
        state: last[1].as_label().unwrap_or_default(),
        counts: parse_counts(last)?,
    };

    let with_state: Vec<&Vec<Cell>> = block.iter().filter(|row| !row[1].is_empty()).collect();
    let mut regions: Vec<Option<String>> = with_state.iter().map(|row| row[0].as_label()).collect();
    forward_fill(&mut regions);

    let mut records = Vec::with_capacity(with_state.len());
    for (row, region) in with_state.into_iter().zip(regions) {
        let state = row[1].as_label().unwrap_or_default();
        if REGION_SUBTOTALS.contains(&state.as_str()) {
            continue;
        }
        let region = region.ok_or_else(|| {
            sheet.mismatch(format!("state '{state}' appears before any region label"))
        })?;
        let apsa_region = region_for_state(&state);
        if !apsa_region.is_mapped() {
            warn!(%state, year, "state has no APSA region");
        }
        records.push(DemographicRecord {
            year,
            region,
            state,
            counts: parse_counts(row)?,
            apsa_region,
        });
    }

    Ok((records, totals))
}

fn parse_counts(row: &[Cell]) -> Result<EthnicityCounts> {
    let mut counts = EthnicityCounts::default();
    for (category, cell) in Ethnicity::ALL.iter().zip(&row[2..12]) {
        counts.set(*category, cell.to_count(category.column_name())?);
    }
    counts.total = row[12].to_count("Total")?;
    Ok(counts)
}
