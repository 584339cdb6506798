//! Input loading for the Opal conversion tools.
//!
//! - [`table`]: Parquet/CSV tables into Polars DataFrames
//! - [`descriptor`]: dataset metadata descriptors (JSON)
//! - [`dictionary`]: variable names from an Opal dictionary workbook

pub mod descriptor;
pub mod dictionary;
pub mod error;
pub mod table;

pub use descriptor::{load_descriptor, parse_descriptor};
pub use dictionary::read_dictionary_names;
pub use error::{IngestError, Result};
pub use table::{TableFormat, column_names, read_table};
