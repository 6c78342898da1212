#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// One fixture cell.
#[derive(Debug, Clone)]
pub enum Fx {
    S(&'static str),
    N(f64),
    E,
}

/// Writes `rows` to the first worksheet of a new workbook, starting at A1.
pub fn write_grid(path: &Path, rows: &[Vec<Fx>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
            match cell {
                Fx::S(text) => {
                    worksheet
                        .write_string(row_idx, col_idx, *text)
                        .expect("string written");
                }
                Fx::N(number) => {
                    worksheet
                        .write_number(row_idx, col_idx, *number)
                        .expect("number written");
                }
                Fx::E => {}
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

/// A school row: state (blank when empty), school, then ten counts
/// `base, base + 1, ..., base + 9`.
pub fn school_row(state: &'static str, school: &'static str, base: f64) -> Vec<Fx> {
    let mut row = vec![
        if state.is_empty() { Fx::E } else { Fx::S(state) },
        Fx::S(school),
    ];
    row.extend((0..10).map(|offset| Fx::N(base + offset as f64)));
    row
}

/// A totals row with the given state-column label.
pub fn totals_row(label: &'static str, base: f64) -> Vec<Fx> {
    let mut row = vec![Fx::S(label), Fx::E];
    row.extend((0..10).map(|offset| Fx::N(base + offset as f64)));
    row
}

/// Builds a cycle sheet whose 1-based header row is `head`: a title in A1,
/// blank rows, the column titles, then `body` rows. Returns the matching
/// 1-based footer row.
pub fn cycle_sheet(path: &Path, head: u32, body: Vec<Vec<Fx>>) -> u32 {
    let mut rows = vec![vec![Fx::S("Table A-1: Applicants and Matriculants")]];
    while rows.len() < (head - 1) as usize {
        rows.push(Vec::new());
    }
    let mut header = vec![Fx::S("State"), Fx::S("Medical School")];
    header.extend((0..10).map(|_| Fx::S("Count")));
    rows.push(header);

    let foot = head + body.len() as u32;
    rows.extend(body);
    write_grid(path, &rows);
    foot
}

/// A demographic row: region (blank when empty), state (blank when empty),
/// ten category counts starting at `base`, and a total.
pub fn demographic_row(region: &'static str, state: &'static str, base: f64) -> Vec<Fx> {
    let text = |value: &'static str| if value.is_empty() { Fx::E } else { Fx::S(value) };
    let mut row = vec![text(region), text(state)];
    row.extend((0..10).map(|offset| Fx::N(base + offset as f64)));
    row.push(Fx::N(base * 10.0 + 45.0));
    row
}
