use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::aamc::tables::config::TableProfile;
use crate::aamc::tables::cycle;
use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::model::{CycleYear, MergedTable, Metric, SchoolRecord, TotalsTable};
use crate::aamc::tables::names::{self, NameMappingDrift};
use crate::aamc::tables::totals;

/// Column headers of a merged school table, in output order.
pub fn detail_columns() -> Vec<String> {
    let mut columns = vec![
        "cycle_year".to_string(),
        "state".to_string(),
        "school".to_string(),
    ];
    columns.extend(Metric::ALL.iter().map(|metric| metric.column_name().to_string()));
    columns
}

/// Reads every year in `files` (ascending), concatenates the school rows,
/// cleans school names and assembles the corrected totals table. `files`
/// must hold exactly the years the profile has shapes for.
#[instrument(level = "info", skip_all, fields(table = %profile.kind, years = files.len()))]
pub fn merge_cycles(
    profile: &TableProfile,
    files: &BTreeMap<CycleYear, PathBuf>,
) -> Result<(MergedTable, TotalsTable)> {
    if let Some(&year) = profile.shapes.keys().find(|year| !files.contains_key(year)) {
        return Err(TableError::MissingYear {
            table: profile.kind,
            year,
        });
    }

    let mut rows: Vec<SchoolRecord> = Vec::new();
    let mut year_totals = Vec::with_capacity(files.len());

    for (&year, path) in files {
        let shape = profile.shapes.get(&year).ok_or(TableError::MissingShape {
            table: profile.kind,
            year,
        })?;
        let table = cycle::read_cycle(path, shape, year)
            .map_err(|error| error.in_year(profile.kind, year))?;
        rows.extend(table.schools);
        year_totals.push(table.totals);
    }

    for drift in clean_school_names(&mut rows) {
        warn!(table = %profile.kind, %drift, "school alias target missing");
    }

    let totals = totals::assemble_totals(profile, year_totals)?;
    info!(
        table = %profile.kind,
        schools = rows.len(),
        years = totals.rows.len(),
        "merged cycle tables"
    );

    Ok((
        MergedTable {
            kind: profile.kind,
            rows,
        },
        totals,
    ))
}

/// Strips footnote digits from every school name and applies the shared
/// alias table. Returns the aliases whose canonical name never showed up.
pub fn clean_school_names(rows: &mut [SchoolRecord]) -> Vec<NameMappingDrift> {
    for row in rows.iter_mut() {
        row.school = names::canonical_school(&row.school);
    }
    names::unmatched_aliases(rows.iter().map(|row| row.school.as_str()))
}
