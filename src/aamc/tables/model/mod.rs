use std::fmt;
use std::path::{Path, PathBuf};

use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::regions::ApsaRegion;

/// Calendar year an application cycle or demographic table is reported for.
pub type CycleYear = u16;

/// The AAMC table families the tool knows how to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    /// Applicants and matriculants to U.S. MD-granting schools by state and school.
    A1,
    /// MD-PhD applicants and matriculants by state and school.
    B8,
    /// Applicants by state of legal residence and race/ethnicity.
    A10,
}

impl TableKind {
    /// Label used in output table names, e.g. `A-1`.
    pub fn label(self) -> &'static str {
        match self {
            TableKind::A1 => "A-1",
            TableKind::B8 => "B-8",
            TableKind::A10 => "A-10",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single spreadsheet cell after loading. Blank strings collapse to
/// [`Cell::Empty`] so forward-fill treats them as missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Builds a text cell, mapping whitespace-only input to [`Cell::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Renders the cell as a label. Whole numbers print without a fraction.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(value) => Some(value.trim().to_string()),
            Cell::Number(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
            Cell::Number(value) => Some(value.to_string()),
        }
    }

    /// Interprets the cell as a non-negative count. Blank cells are absent
    /// counts; text may carry thousands separators.
    pub fn to_count(&self, column: &str) -> Result<Option<u64>> {
        let invalid = |value: String| TableError::InvalidLiteral {
            column: column.to_string(),
            value,
        };
        match self {
            Cell::Empty => Ok(None),
            Cell::Number(value) => {
                if *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64 {
                    Ok(Some(*value as u64))
                } else {
                    Err(invalid(value.to_string()))
                }
            }
            Cell::Text(value) => {
                let cleaned: String = value.trim().chars().filter(|ch| *ch != ',').collect();
                cleaned
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| invalid(value.clone()))
            }
        }
    }
}

/// In-memory rectangular grid read from one worksheet, addressed by absolute
/// 0-based row and column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    path: PathBuf,
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawSheet {
    pub fn new(path: impl Into<PathBuf>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            path: path.into(),
            rows,
            width,
        }
    }

    /// Source file the grid was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at the given position, or an empty cell when the
    /// position lies outside the populated grid.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Copies rows `[start, end)` restricted to the first `columns` columns.
    pub fn block(&self, start: usize, end: usize, columns: usize) -> Vec<Vec<Cell>> {
        (start..end)
            .map(|row| (0..columns).map(|col| self.cell(row, col).clone()).collect())
            .collect()
    }

    /// Builds a [`TableError::ConfigMismatch`] pointing at this sheet.
    pub fn mismatch(&self, detail: impl Into<String>) -> TableError {
        TableError::ConfigMismatch {
            path: self.path.clone(),
            detail: detail.into(),
        }
    }
}

/// The ten count columns shared by tables A-1 and B-8, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Applications,
    InStateApplicants,
    OutOfStateApplicants,
    WomenApplicants,
    MenApplicants,
    Matriculants,
    InStateMatriculants,
    OutOfStateMatriculants,
    WomenMatriculants,
    MenMatriculants,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Applications,
        Metric::InStateApplicants,
        Metric::OutOfStateApplicants,
        Metric::WomenApplicants,
        Metric::MenApplicants,
        Metric::Matriculants,
        Metric::InStateMatriculants,
        Metric::OutOfStateMatriculants,
        Metric::WomenMatriculants,
        Metric::MenMatriculants,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Applications => "applications",
            Metric::InStateApplicants => "in state applicants",
            Metric::OutOfStateApplicants => "out of state applicants",
            Metric::WomenApplicants => "women applicants",
            Metric::MenApplicants => "men applicants",
            Metric::Matriculants => "matriculants",
            Metric::InStateMatriculants => "in state matriculants",
            Metric::OutOfStateMatriculants => "out of state matriculants",
            Metric::WomenMatriculants => "women matriculants",
            Metric::MenMatriculants => "men matriculants",
        }
    }
}

/// Counts reported for one school (or one totals row) in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleMetrics {
    pub applications: Option<u64>,
    pub in_state_applicants: Option<u64>,
    pub out_of_state_applicants: Option<u64>,
    pub women_applicants: Option<u64>,
    pub men_applicants: Option<u64>,
    pub matriculants: Option<u64>,
    pub in_state_matriculants: Option<u64>,
    pub out_of_state_matriculants: Option<u64>,
    pub women_matriculants: Option<u64>,
    pub men_matriculants: Option<u64>,
}

impl CycleMetrics {
    pub fn get(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Applications => self.applications,
            Metric::InStateApplicants => self.in_state_applicants,
            Metric::OutOfStateApplicants => self.out_of_state_applicants,
            Metric::WomenApplicants => self.women_applicants,
            Metric::MenApplicants => self.men_applicants,
            Metric::Matriculants => self.matriculants,
            Metric::InStateMatriculants => self.in_state_matriculants,
            Metric::OutOfStateMatriculants => self.out_of_state_matriculants,
            Metric::WomenMatriculants => self.women_matriculants,
            Metric::MenMatriculants => self.men_matriculants,
        }
    }

    pub fn slot(&mut self, metric: Metric) -> &mut Option<u64> {
        match metric {
            Metric::Applications => &mut self.applications,
            Metric::InStateApplicants => &mut self.in_state_applicants,
            Metric::OutOfStateApplicants => &mut self.out_of_state_applicants,
            Metric::WomenApplicants => &mut self.women_applicants,
            Metric::MenApplicants => &mut self.men_applicants,
            Metric::Matriculants => &mut self.matriculants,
            Metric::InStateMatriculants => &mut self.in_state_matriculants,
            Metric::OutOfStateMatriculants => &mut self.out_of_state_matriculants,
            Metric::WomenMatriculants => &mut self.women_matriculants,
            Metric::MenMatriculants => &mut self.men_matriculants,
        }
    }
}

/// One school in one cycle (a detail row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolRecord {
    pub cycle_year: CycleYear,
    pub state: String,
    pub school: String,
    pub metrics: CycleMetrics,
}

/// The in-file totals row of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTotals {
    pub cycle_year: CycleYear,
    /// Grouping label of the totals row as printed, e.g. `Total`.
    pub label: String,
    pub metrics: CycleMetrics,
}

/// Output of reading one A-1 or B-8 spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleTable {
    pub schools: Vec<SchoolRecord>,
    pub totals: YearTotals,
}

/// Every school row across all merged cycles, in ascending year order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub kind: TableKind,
    pub rows: Vec<SchoolRecord>,
}

/// One year of the merged totals table after corrections.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRecord {
    pub cycle_year: CycleYear,
    pub applicants: u64,
    pub metrics: CycleMetrics,
    pub applications_per_applicant: Option<f64>,
    pub matriculant_applicant_percent: Option<f64>,
}

/// One corrected totals row per merged year, in ascending year order.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsTable {
    pub kind: TableKind,
    pub rows: Vec<TotalsRecord>,
}

/// Race/ethnicity categories reported by table A-10, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ethnicity {
    AmericanIndianOrAlaskaNative,
    Asian,
    BlackOrAfricanAmerican,
    HispanicOrLatino,
    NativeHawaiianOrPacificIslander,
    White,
    Other,
    Multiple,
    Unknown,
    NonCitizen,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 10] = [
        Ethnicity::AmericanIndianOrAlaskaNative,
        Ethnicity::Asian,
        Ethnicity::BlackOrAfricanAmerican,
        Ethnicity::HispanicOrLatino,
        Ethnicity::NativeHawaiianOrPacificIslander,
        Ethnicity::White,
        Ethnicity::Other,
        Ethnicity::Multiple,
        Ethnicity::Unknown,
        Ethnicity::NonCitizen,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Ethnicity::AmericanIndianOrAlaskaNative => "American Indian or Alaska Native",
            Ethnicity::Asian => "Asian",
            Ethnicity::BlackOrAfricanAmerican => "Black or African American",
            Ethnicity::HispanicOrLatino => "Hispanic, Latino, or of Spanish Origin",
            Ethnicity::NativeHawaiianOrPacificIslander => {
                "Native Hawaiian or Other Pacific Islander"
            }
            Ethnicity::White => "White",
            Ethnicity::Other => "Other",
            Ethnicity::Multiple => "Multiple Race/Ethnicity",
            Ethnicity::Unknown => "Unknown Race/Ethnicity",
            Ethnicity::NonCitizen => "Non-U.S. Citizen and Non-Permanent Resident",
        }
    }

    fn index(self) -> usize {
        Ethnicity::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or_default()
    }
}

/// Applicant counts per race/ethnicity category plus the row total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EthnicityCounts {
    pub by_category: [Option<u64>; 10],
    pub total: Option<u64>,
}

impl EthnicityCounts {
    pub fn get(&self, category: Ethnicity) -> Option<u64> {
        self.by_category[category.index()]
    }

    pub fn set(&mut self, category: Ethnicity, value: Option<u64>) {
        self.by_category[category.index()] = value;
    }
}

/// One state row of table A-10.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographicRecord {
    pub year: CycleYear,
    pub region: String,
    pub state: String,
    pub counts: EthnicityCounts,
    pub apsa_region: ApsaRegion,
}

/// The grand-total row of one A-10 sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographicTotals {
    pub year: CycleYear,
    pub region: String,
    pub state: String,
    pub counts: EthnicityCounts,
}
