use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aamc::tables::error::Result;
use crate::aamc::tables::model::{CycleYear, Metric, TableKind};

/// First cycle whose sheets list men before women.
pub const MEN_FIRST_SINCE: CycleYear = 2018;

/// Number of columns read from A-1 and B-8 sheets.
pub const CYCLE_COLUMNS: usize = 12;

/// Left-to-right order of the sex-split metric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    WomenFirst,
    MenFirst,
}

impl ColumnOrder {
    pub fn for_year(year: CycleYear) -> Self {
        if year >= MEN_FIRST_SINCE {
            ColumnOrder::MenFirst
        } else {
            ColumnOrder::WomenFirst
        }
    }

    /// Metrics in sheet order, i.e. columns 3 through 12.
    pub fn metrics(self) -> [Metric; 10] {
        use Metric::*;
        match self {
            ColumnOrder::WomenFirst => Metric::ALL,
            ColumnOrder::MenFirst => [
                Applications,
                InStateApplicants,
                OutOfStateApplicants,
                MenApplicants,
                WomenApplicants,
                Matriculants,
                InStateMatriculants,
                OutOfStateMatriculants,
                MenMatriculants,
                WomenMatriculants,
            ],
        }
    }

    /// All twelve column names in sheet order.
    pub fn column_names(self) -> Vec<&'static str> {
        let mut names = vec!["state", "school"];
        names.extend(self.metrics().iter().map(|metric| metric.column_name()));
        names
    }
}

/// Where the data block of one A-1 or B-8 sheet sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetShape {
    /// 1-based row holding the column titles.
    pub head: u32,
    /// 1-based row holding the totals line; the last row read.
    pub foot: u32,
    pub order: ColumnOrder,
}

impl SheetShape {
    pub fn new(year: CycleYear, head: u32, foot: u32) -> Self {
        Self {
            head,
            foot,
            order: ColumnOrder::for_year(year),
        }
    }

    /// Number of school rows the shape yields once the totals row is dropped.
    pub fn detail_rows(&self) -> usize {
        (self.foot as usize).saturating_sub(self.head as usize + 1)
    }
}

/// Externally sourced totals that replace the unreliable in-file values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectedTotals {
    pub applicants: u64,
    pub applications: Option<u64>,
    pub matriculants: Option<u64>,
}

/// Everything year-dependent the merger needs for one table family.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    pub kind: TableKind,
    pub shapes: BTreeMap<CycleYear, SheetShape>,
    pub corrections: BTreeMap<CycleYear, CorrectedTotals>,
}

const A1_SHAPES: [(CycleYear, u32, u32); 10] = [
    (2012, 10, 148),
    (2013, 10, 152),
    (2014, 10, 153),
    (2015, 9, 153),
    (2016, 9, 156),
    (2017, 9, 157),
    (2018, 9, 161),
    (2019, 9, 163),
    (2020, 9, 165),
    (2021, 9, 165),
];

// (year, applicants, applications, matriculants)
const A1_CORRECTIONS: [(CycleYear, u64, u64, u64); 10] = [
    (2012, 45266, 636309, 19517),
    (2013, 48014, 690281, 20055),
    (2014, 49480, 731595, 20343),
    (2015, 52550, 781602, 20631),
    (2016, 53042, 830016, 21030),
    (2017, 51680, 816153, 21338),
    (2018, 52777, 849678, 21622),
    (2019, 53371, 896819, 21869),
    (2020, 53030, 906588, 22239),
    (2021, 62443, 1099486, 22666),
];

const B8_SHAPES: [(CycleYear, u32, u32); 10] = [
    (2012, 10, 148),
    (2013, 10, 152),
    (2014, 10, 152),
    (2015, 9, 152),
    (2016, 9, 155),
    (2017, 9, 157),
    (2018, 9, 161),
    (2019, 9, 163),
    (2020, 9, 165),
    (2021, 9, 165),
];

const B8_APPLICANTS: [(CycleYear, u64); 10] = [
    (2012, 1853),
    (2013, 1937),
    (2014, 1891),
    (2015, 1887),
    (2016, 1936),
    (2017, 1858),
    (2018, 1855),
    (2019, 1813),
    (2020, 1855),
    (2021, 2091),
];

impl TableProfile {
    /// Built-in profile for table A-1, cycles 2012 through 2021.
    pub fn a1() -> Self {
        Self {
            kind: TableKind::A1,
            shapes: shapes_from(&A1_SHAPES),
            corrections: A1_CORRECTIONS
                .iter()
                .map(|&(year, applicants, applications, matriculants)| {
                    (
                        year,
                        CorrectedTotals {
                            applicants,
                            applications: Some(applications),
                            matriculants: Some(matriculants),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Built-in profile for table B-8. Only applicant counts are corrected.
    pub fn b8() -> Self {
        Self {
            kind: TableKind::B8,
            shapes: shapes_from(&B8_SHAPES),
            corrections: B8_APPLICANTS
                .iter()
                .map(|&(year, applicants)| {
                    (
                        year,
                        CorrectedTotals {
                            applicants,
                            applications: None,
                            matriculants: None,
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn for_kind(kind: TableKind) -> Option<Self> {
        match kind {
            TableKind::A1 => Some(Self::a1()),
            TableKind::B8 => Some(Self::b8()),
            TableKind::A10 => None,
        }
    }

    /// Replaces the header/footer rows of one year, keeping its column order.
    pub fn override_shape(&mut self, year: CycleYear, head: u32, foot: u32) {
        self.shapes.insert(year, SheetShape::new(year, head, foot));
    }
}

fn shapes_from(table: &[(CycleYear, u32, u32)]) -> BTreeMap<CycleYear, SheetShape> {
    table
        .iter()
        .map(|&(year, head, foot)| (year, SheetShape::new(year, head, foot)))
        .collect()
}

/// One explicitly listed input spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YearFile {
    pub year: CycleYear,
    pub path: PathBuf,
    #[serde(default)]
    pub head: Option<u32>,
    #[serde(default)]
    pub foot: Option<u32>,
}

/// Where the spreadsheets of one A-1 or B-8 family come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CycleSource {
    /// Every year-named `.xlsx` file in a directory.
    Directory { dir: PathBuf },
    /// Explicit (year, file) pairs, optionally overriding the shape.
    Files { files: Vec<YearFile> },
}

/// One A-10 spreadsheet. `head` is the 0-based row of column titles and
/// `foot` the number of data rows below it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemographicSource {
    pub year: CycleYear,
    pub path: PathBuf,
    pub head: u32,
    pub foot: u32,
}

/// The JSON run manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub a1: Option<CycleSource>,
    #[serde(default)]
    pub b8: Option<CycleSource>,
    #[serde(default)]
    pub a10: Vec<DemographicSource>,
}

impl Manifest {
    /// Reads a manifest and resolves its relative paths against the
    /// manifest's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut manifest: Manifest = serde_json::from_str(&data)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.resolve_paths(base);
        Ok(manifest)
    }

    pub fn is_empty(&self) -> bool {
        self.a1.is_none() && self.b8.is_none() && self.a10.is_empty()
    }

    fn resolve_paths(&mut self, base: &Path) {
        for source in [self.a1.as_mut(), self.b8.as_mut()].into_iter().flatten() {
            match source {
                CycleSource::Directory { dir } => *dir = base.join(&*dir),
                CycleSource::Files { files } => {
                    for file in files {
                        file.path = base.join(&file.path);
                    }
                }
            }
        }
        for source in &mut self.a10 {
            source.path = base.join(&source.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order_flips_in_2018() {
        let before = ColumnOrder::for_year(2017).column_names();
        let after = ColumnOrder::for_year(2018).column_names();
        assert_eq!(before.len(), CYCLE_COLUMNS);
        assert_eq!(before[5], "women applicants");
        assert_eq!(after[5], "men applicants");
        assert_eq!(after[10], "men matriculants");
        assert_eq!(after[11], "women matriculants");
    }

    #[test]
    fn profiles_cover_the_same_years() {
        for profile in [TableProfile::a1(), TableProfile::b8()] {
            let shape_years: Vec<_> = profile.shapes.keys().copied().collect();
            let correction_years: Vec<_> = profile.corrections.keys().copied().collect();
            assert_eq!(shape_years, (2012..=2021).collect::<Vec<_>>());
            assert_eq!(shape_years, correction_years);
        }
    }

    #[test]
    fn manifest_paths_resolve_against_its_directory() {
        let json = r#"{
            "a1": { "dir": "A-1" },
            "b8": { "files": [ { "year": 2012, "path": "B-8/2012.xlsx", "foot": 20 } ] },
            "a10": [ { "year": 2021, "path": "A-10/2021.xlsx", "head": 7, "foot": 70 } ]
        }"#;
        let mut manifest: Manifest = serde_json::from_str(json).expect("manifest parsed");
        manifest.resolve_paths(Path::new("/data"));

        assert_eq!(
            manifest.a1,
            Some(CycleSource::Directory {
                dir: PathBuf::from("/data/A-1")
            })
        );
        match manifest.b8 {
            Some(CycleSource::Files { files }) => {
                assert_eq!(files[0].path, PathBuf::from("/data/B-8/2012.xlsx"));
                assert_eq!(files[0].head, None);
                assert_eq!(files[0].foot, Some(20));
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(manifest.a10[0].path, PathBuf::from("/data/A-10/2021.xlsx"));
    }
}
