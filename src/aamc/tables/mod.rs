pub mod config;
pub mod cycle;
pub mod demographic;
pub mod error;
pub mod export;
pub mod io;
pub mod merge;
pub mod model;
pub mod names;
pub mod pipeline;
pub mod regions;
pub mod totals;

pub use error::{Result, TableError};
