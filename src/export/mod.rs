//! Data export in tabular formats.

pub mod trials_csv;

pub use trials_csv::CsvObserver;
