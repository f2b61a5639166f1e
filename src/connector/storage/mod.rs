//! Storage implementations for the tabular-file boundary.

mod csv_table;

pub use csv_table::*;
