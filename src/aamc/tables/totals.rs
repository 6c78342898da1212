use tracing::debug;

use crate::aamc::tables::config::TableProfile;
use crate::aamc::tables::error::{Result, TableError};
use crate::aamc::tables::model::{Metric, TotalsRecord, TotalsTable, YearTotals};

/// Column headers of a totals table, in output order.
pub fn totals_columns() -> Vec<String> {
    let mut columns = vec!["cycle_year".to_string(), "applicants".to_string()];
    columns.extend(Metric::ALL.iter().map(|metric| metric.column_name().to_string()));
    columns.push("applications per applicant".to_string());
    columns.push("matriculant applicant percent".to_string());
    columns
}

/// Stacks the in-file totals rows in year order, replaces the columns the
/// profile carries corrections for, and derives the two ratio columns.
pub fn assemble_totals(profile: &TableProfile, mut years: Vec<YearTotals>) -> Result<TotalsTable> {
    years.sort_by_key(|totals| totals.cycle_year);

    let mut rows = Vec::with_capacity(years.len());
    for totals in years {
        let year = totals.cycle_year;
        let correction = profile
            .corrections
            .get(&year)
            .ok_or(TableError::MissingCorrection {
                table: profile.kind,
                year,
            })?;

        let mut metrics = totals.metrics;
        if let Some(applications) = correction.applications {
            metrics.applications = Some(applications);
        }
        if let Some(matriculants) = correction.matriculants {
            metrics.matriculants = Some(matriculants);
        }

        let applicants = correction.applicants;
        let applications_per_applicant = ratio(metrics.applications, applicants);
        let matriculant_applicant_percent =
            ratio(metrics.matriculants, applicants).map(|share| share * 100.0);
        debug!(
            table = %profile.kind,
            year,
            applicants,
            ?applications_per_applicant,
            "assembled totals row"
        );

        rows.push(TotalsRecord {
            cycle_year: year,
            applicants,
            metrics,
            applications_per_applicant,
            matriculant_applicant_percent,
        });
    }

    Ok(TotalsTable {
        kind: profile.kind,
        rows,
    })
}

fn ratio(numerator: Option<u64>, applicants: u64) -> Option<f64> {
    match (numerator, applicants) {
        (_, 0) => None,
        (Some(value), applicants) => Some(value as f64 / applicants as f64),
        (None, _) => None,
    }
}
