use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::model::CycleYear;

fn digit_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

/// Extracts the single four-digit year (19xx or 20xx) embedded in a file
/// name, if there is exactly one.
pub fn year_from_name(name: &str) -> Option<CycleYear> {
    let mut years = digit_runs()
        .find_iter(name)
        .map(|run| run.as_str())
        .filter(|run| run.len() == 4 && (run.starts_with("19") || run.starts_with("20")))
        .filter_map(|run| run.parse::<CycleYear>().ok());
    let year = years.next()?;
    match years.next() {
        Some(_) => None,
        None => Some(year),
    }
}

/// Keys every `.xlsx` file in `dir` by the year in its name. Files without
/// a recognisable year are skipped; two files for one year are an error.
pub fn discover_year_files(dir: &Path) -> Result<BTreeMap<CycleYear, PathBuf>> {
    if !dir.is_dir() {
        return Err(TableError::MissingInput(dir.to_path_buf()));
    }

    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if !is_workbook {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        // Excel lock files, e.g. `~$2019.xlsx`.
        if name.starts_with("~$") {
            continue;
        }
        let Some(year) = year_from_name(name) else {
            warn!(path = %path.display(), "skipping workbook without a year in its name");
            continue;
        };

        if let Some(first) = files.get(&year) {
            return Err(TableError::DuplicateYear {
                year,
                first: PathBuf::clone(first),
                second: path,
            });
        }
        debug!(year, path = %path.display(), "discovered workbook");
        files.insert(year, path);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_year_in_typical_names() {
        assert_eq!(year_from_name("2019_FACTS_Table_A-1.xlsx"), Some(2019));
        assert_eq!(year_from_name("factsa1 2015.xlsx"), Some(2015));
        assert_eq!(year_from_name("table-b8.xlsx"), None);
        assert_eq!(year_from_name("2012-2013.xlsx"), None);
        assert_eq!(year_from_name("A-10 123456.xlsx"), None);
    }
}
