use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aamc::tables::error::Result;
use crate::aamc::tables::export::SheetTable;

/// Writes `table` to `<dir>/<table name>.csv` with a header row and no index
/// column. Returns the path written.
pub fn write_table(dir: &Path, table: &SheetTable) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", table.name));
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.render()))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = table.rows.len(), "wrote CSV table");
    Ok(path)
}
