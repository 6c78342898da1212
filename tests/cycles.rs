mod common;

use std::collections::BTreeMap;

use aamc_merge::config::{ColumnOrder, SheetShape, TableProfile};
use aamc_merge::model::TableKind;
use aamc_merge::{TableError, cycle, merge};
use common::{Fx, cycle_sheet, school_row, totals_row};
use tempfile::tempdir;

/// The built-in A-1 profile narrowed to one year whose header sits on row 2.
fn single_year_profile(year: u16, foot: u32) -> TableProfile {
    let mut profile = TableProfile::a1();
    profile.shapes.retain(|&shaped, _| shaped == year);
    profile.override_shape(year, 2, foot);
    profile
}

#[test]
fn nine_schools_and_a_trailing_total() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2015.xlsx");

    let mut body: Vec<Vec<Fx>> = (0..9)
        .map(|idx| {
            let state = if idx % 3 == 0 { "Ohio" } else { "" };
            school_row(state, "Case Western", idx as f64 * 100.0)
        })
        .collect();
    body.push(totals_row("Total: 500", 500.0));
    let foot = cycle_sheet(&path, 3, body);

    let shape = SheetShape::new(2015, 3, foot);
    let table = cycle::read_cycle(&path, &shape, 2015).expect("cycle read");

    assert_eq!(table.schools.len(), shape.detail_rows());
    assert_eq!(table.schools.len(), 9);
    assert_eq!(table.totals.label, "Total: 500");
    assert_eq!(table.totals.cycle_year, 2015);
    assert_eq!(table.totals.metrics.applications, Some(500));
    assert!(table.schools.iter().all(|school| school.state == "Ohio"));
    assert!(table.schools.iter().all(|school| school.cycle_year == 2015));
}

#[test]
fn women_first_and_men_first_columns_land_in_the_same_fields() {
    let temp_dir = tempdir().expect("temporary directory");

    for year in [2017, 2018] {
        let path = temp_dir.path().join(format!("b8-{year}.xlsx"));
        let foot = cycle_sheet(
            &path,
            2,
            vec![school_row("Iowa", "Iowa", 10.0), totals_row("Total", 10.0)],
        );
        let shape = SheetShape::new(year, 2, foot);
        let table = cycle::read_cycle(&path, &shape, year).expect("cycle read");
        let metrics = &table.schools[0].metrics;

        // Sheet columns 6 and 7 hold counts 13 and 14.
        match ColumnOrder::for_year(year) {
            ColumnOrder::WomenFirst => {
                assert_eq!(metrics.women_applicants, Some(13));
                assert_eq!(metrics.men_applicants, Some(14));
                assert_eq!(metrics.women_matriculants, Some(18));
            }
            ColumnOrder::MenFirst => {
                assert_eq!(metrics.men_applicants, Some(13));
                assert_eq!(metrics.women_applicants, Some(14));
                assert_eq!(metrics.men_matriculants, Some(18));
            }
        }
        assert_eq!(metrics.applications, Some(10));
        assert_eq!(metrics.matriculants, Some(15));
    }
}

#[test]
fn heersink_rows_collapse_onto_alabama() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2021.xlsx");
    let foot = cycle_sheet(
        &path,
        2,
        vec![
            school_row("Alabama", "Heersink1", 100.0),
            school_row("", "Heersink School2", 50.0),
            totals_row("Total", 150.0),
        ],
    );

    let profile = single_year_profile(2021, foot);
    let files = BTreeMap::from([(2021, path)]);
    let (merged, totals) = merge::merge_cycles(&profile, &files).expect("merge succeeded");

    assert_eq!(merged.rows.len(), 2);
    for row in &merged.rows {
        assert_eq!(row.state, "Alabama");
        assert_eq!(row.school, "Alabama");
    }
    assert_eq!(merged.rows[0].metrics.applications, Some(100));
    assert_eq!(merged.rows[1].metrics.applications, Some(50));
    assert_eq!(totals.rows.len(), 1);
    assert_eq!(totals.rows[0].applicants, 62443);
}

#[test]
fn two_total_rows_are_ambiguous() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2016.xlsx");
    let foot = cycle_sheet(
        &path,
        2,
        vec![
            school_row("Texas", "Baylor", 1.0),
            totals_row("Total for Texas", 1.0),
            totals_row("Total", 1.0),
        ],
    );

    let profile = single_year_profile(2016, foot);
    let files = BTreeMap::from([(2016, path)]);
    let error = merge::merge_cycles(&profile, &files).expect_err("ambiguous totals");

    match error {
        TableError::Year {
            table,
            year,
            source,
        } => {
            assert_eq!(table, TableKind::A1);
            assert_eq!(year, 2016);
            assert!(matches!(*source, TableError::TotalsAmbiguity { matches: 2, .. }));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn footer_must_be_the_totals_row() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2014.xlsx");
    let foot = cycle_sheet(
        &path,
        2,
        vec![
            school_row("Utah", "Utah", 1.0),
            totals_row("Total", 1.0),
            school_row("Vermont", "Vermont", 1.0),
        ],
    );

    let shape = SheetShape::new(2014, 2, foot);
    let error = cycle::read_cycle(&path, &shape, 2014).expect_err("totals not last");
    assert!(matches!(error, TableError::ConfigMismatch { .. }));
}

#[test]
fn footer_past_the_sheet_is_a_mismatch() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2013.xlsx");
    let foot = cycle_sheet(
        &path,
        2,
        vec![school_row("Utah", "Utah", 1.0), totals_row("Total", 1.0)],
    );

    let shape = SheetShape::new(2013, 2, foot + 5);
    let error = cycle::read_cycle(&path, &shape, 2013).expect_err("footer beyond sheet");
    assert!(error.to_string().contains("past the last row"));
}

#[test]
fn non_numeric_counts_are_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2012.xlsx");
    let mut row = school_row("Utah", "Utah", 1.0);
    row[4] = Fx::S("n/a");
    let foot = cycle_sheet(&path, 2, vec![row, totals_row("Total", 1.0)]);

    let shape = SheetShape::new(2012, 2, foot);
    let error = cycle::read_cycle(&path, &shape, 2012).expect_err("bad literal");
    match error {
        TableError::InvalidLiteral { column, value } => {
            assert_eq!(column, "out of state applicants");
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn leading_row_without_state_is_a_mismatch() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2019.xlsx");
    let foot = cycle_sheet(
        &path,
        2,
        vec![
            school_row("", "Utah", 1.0),
            school_row("Vermont", "Vermont", 1.0),
            totals_row("Total", 2.0),
        ],
    );

    let shape = SheetShape::new(2019, 2, foot);
    let error = cycle::read_cycle(&path, &shape, 2019).expect_err("no state to inherit");
    assert!(matches!(error, TableError::ConfigMismatch { .. }));
    assert!(error.to_string().contains("no state to inherit"));
}

#[test]
fn blank_school_is_a_mismatch() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("a1-2020.xlsx");
    let mut row = school_row("Utah", "Utah", 1.0);
    row[1] = Fx::E;
    let foot = cycle_sheet(&path, 2, vec![row, totals_row("Total", 1.0)]);

    let shape = SheetShape::new(2020, 2, foot);
    let error = cycle::read_cycle(&path, &shape, 2020).expect_err("blank school");
    assert!(matches!(error, TableError::ConfigMismatch { .. }));
    assert!(error.to_string().contains("no school name"));
}

#[test]
fn missing_year_stops_the_merge() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut files = BTreeMap::new();
    for year in [2012, 2021] {
        let path = temp_dir.path().join(format!("a1-{year}.xlsx"));
        cycle_sheet(
            &path,
            2,
            vec![school_row("Utah", "Utah", 1.0), totals_row("Total", 1.0)],
        );
        files.insert(year, path);
    }

    let error = merge::merge_cycles(&TableProfile::a1(), &files).expect_err("years missing");
    assert!(matches!(
        error,
        TableError::MissingYear {
            table: TableKind::A1,
            year: 2013
        }
    ));
}
