use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aamc::tables::error::Result;
use crate::aamc::tables::export::{ExportCell, SheetTable};

/// Writes every table to its own worksheet of one workbook.
pub fn write_workbook(path: &Path, tables: &[SheetTable]) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut used = HashSet::new();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(unique_sheet_name(&table.name, &mut used))?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true);
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, table.rows.len() as u32, col_end, &excel_table)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &ExportCell) -> Result<()> {
    match cell {
        ExportCell::Empty => {}
        ExportCell::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        ExportCell::Integer(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        ExportCell::Float(value) => {
            worksheet.write_number(row, col, *value)?;
        }
    }
    Ok(())
}

/// Excel caps sheet names at 31 characters and forbids a few symbols.
fn unique_sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']'];
    let mut base: String = raw
        .chars()
        .map(|ch| if invalid.contains(&ch) { '_' } else { ch })
        .collect();
    base = base.trim().to_string();
    if base.is_empty() {
        base = "Sheet".to_string();
    }
    base = truncate_chars(&base, 31);

    let mut candidate = base.clone();
    let mut counter = 1;
    while used.contains(&candidate) {
        let suffix = format!("_{counter}");
        candidate = format!("{}{suffix}", truncate_chars(&base, 31 - suffix.len()));
        counter += 1;
    }
    used.insert(candidate.clone());
    candidate
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
