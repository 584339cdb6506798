//! Output writers for the Opal conversion tools.

pub mod error;
pub mod table;
pub mod workbook;

pub use error::{OutputError, Result};
pub use table::write_csv;
pub use workbook::write_dictionary_workbook;
