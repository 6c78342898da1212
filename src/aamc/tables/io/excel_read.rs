use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::model::{Cell, RawSheet};

/// Loads the first worksheet of an `.xlsx` file into a [`RawSheet`].
///
/// Cell positions are kept absolute: blank leading rows and columns that
/// calamine trims from the used range are restored as empty cells so that
/// configured row numbers line up with what a spreadsheet viewer shows.
pub fn load_sheet(path: &Path) -> Result<RawSheet> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::ConfigMismatch {
            path: path.to_path_buf(),
            detail: "workbook has no worksheets".into(),
        })?
        .map_err(TableError::from)?;

    let sheet = range_to_sheet(path, &range);
    debug!(
        path = %path.display(),
        height = sheet.height(),
        width = sheet.width(),
        "loaded worksheet"
    );
    Ok(sheet)
}

fn range_to_sheet(path: &Path, range: &Range<DataType>) -> RawSheet {
    let Some((row_offset, col_offset)) = range.start() else {
        return RawSheet::new(path, Vec::new());
    };
    let (height, width) = range.get_size();
    let row_offset = row_offset as usize;
    let col_offset = col_offset as usize;

    let mut rows = vec![vec![Cell::Empty; col_offset + width]; row_offset + height];
    for (row, col, value) in range.cells() {
        rows[row_offset + row][col_offset + col] = to_cell(value);
    }
    RawSheet::new(path, rows)
}

fn to_cell(value: &DataType) -> Cell {
    match value {
        DataType::Empty => Cell::Empty,
        DataType::String(text) => Cell::text(text.clone()),
        DataType::Float(number) => Cell::Number(*number),
        DataType::Int(number) => Cell::Number(*number as f64),
        other => Cell::text(other.to_string()),
    }
}
