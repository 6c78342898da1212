//! Core library for the aamc-merge command line application.
//!
//! The library reads the yearly AAMC admissions spreadsheets (tables A-1,
//! B-8 and A-10), normalises their shifting layouts and stacks them into
//! long-format tables. Sheet loading and output writers live under
//! [`aamc::tables::io`], the typed rows in [`aamc::tables::model`], the
//! per-file readers in [`aamc::tables::cycle`] and
//! [`aamc::tables::demographic`], and run orchestration in
//! [`aamc::tables::pipeline`].

pub mod aamc;

pub use aamc::tables::{
    Result, TableError, config, cycle, demographic, error, export, io, merge, model, names,
    pipeline, regions, totals,
};
