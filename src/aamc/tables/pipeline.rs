use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::aamc::tables::config::{CycleSource, Manifest, TableProfile};
use crate::aamc::tables::demographic;
use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::export::{self, SheetTable};
use crate::aamc::tables::io::{csv_write, discover, excel_write};
use crate::aamc::tables::merge;
use crate::aamc::tables::model::{CycleYear, TableKind};

/// Name of the workbook written in [`OutputFormat::Xlsx`] mode.
pub const WORKBOOK_NAME: &str = "AAMC Merged.xlsx";

/// How merged tables are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One CSV file per table.
    Csv,
    /// One workbook with a worksheet per table.
    Xlsx,
}

/// Turns a manifest source into a profile (with any per-file shape
/// overrides applied) and the year → file map to read.
pub fn resolve_cycle_source(
    kind: TableKind,
    source: &CycleSource,
) -> Result<(TableProfile, BTreeMap<CycleYear, PathBuf>)> {
    let mut profile = TableProfile::for_kind(kind).ok_or(TableError::NothingToMerge)?;

    let files = match source {
        CycleSource::Directory { dir } => discover::discover_year_files(dir)?,
        CycleSource::Files { files } => {
            let mut by_year: BTreeMap<CycleYear, PathBuf> = BTreeMap::new();
            for file in files {
                if !file.path.exists() {
                    return Err(TableError::MissingInput(file.path.clone()));
                }
                if let Some(first) = by_year.get(&file.year) {
                    return Err(TableError::DuplicateYear {
                        year: file.year,
                        first: PathBuf::clone(first),
                        second: file.path.clone(),
                    });
                }

                let base = profile.shapes.get(&file.year).copied();
                let head = file.head.or(base.map(|shape| shape.head));
                let foot = file.foot.or(base.map(|shape| shape.foot));
                if let (Some(head), Some(foot)) = (head, foot) {
                    profile.override_shape(file.year, head, foot);
                }
                by_year.insert(file.year, file.path.clone());
            }
            by_year
        }
    };

    Ok((profile, files))
}

/// Reads and merges every table family the manifest names.
pub fn build_tables(manifest: &Manifest) -> Result<Vec<SheetTable>> {
    if manifest.is_empty() {
        return Err(TableError::NothingToMerge);
    }

    let mut tables = Vec::new();
    for (kind, source) in [(TableKind::A1, &manifest.a1), (TableKind::B8, &manifest.b8)] {
        let Some(source) = source else {
            continue;
        };
        let (profile, files) = resolve_cycle_source(kind, source)?;
        let (merged, totals) = merge::merge_cycles(&profile, &files)?;
        tables.push(export::merged_sheet(&merged));
        tables.push(export::totals_sheet(&totals));
    }

    if !manifest.a10.is_empty() {
        let (records, totals) = demographic::merge_demographics(&manifest.a10)?;
        tables.push(export::demographic_sheet(&records));
        tables.push(export::demographic_totals_sheet(&totals));
    }

    Ok(tables)
}

/// Writes the tables into `output` and returns the files created.
pub fn write_tables(
    tables: &[SheetTable],
    output: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output)?;
    match format {
        OutputFormat::Csv => tables
            .iter()
            .map(|table| csv_write::write_table(output, table))
            .collect(),
        OutputFormat::Xlsx => {
            let path = output.join(WORKBOOK_NAME);
            excel_write::write_workbook(&path, tables)?;
            Ok(vec![path])
        }
    }
}

/// Runs one complete merge: read every configured sheet, merge, write.
#[instrument(level = "info", skip_all, fields(output = %output.display(), ?format))]
pub fn run(manifest: &Manifest, output: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    let tables = build_tables(manifest)?;
    let written = write_tables(&tables, output, format)?;
    info!(
        tables = tables.len(),
        files = written.len(),
        "wrote merged tables"
    );
    Ok(written)
}
