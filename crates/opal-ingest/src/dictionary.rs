//! Dictionary spreadsheet reading.
//!
//! Only the variable names are needed: they are compared against a table's
//! columns before encoding.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{IngestError, Result};

/// Read the non-empty cells of `column` from `sheet`, in sheet order.
///
/// The first row of the sheet is the header. Works for `.xlsx`, `.xls` and
/// `.ods` workbooks.
pub fn read_dictionary_names(path: &Path, sheet: &str, column: &str) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(IngestError::MissingSheet {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
        });
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let missing_column = || IngestError::MissingColumn {
        column: column.to_string(),
        sheet: sheet.to_string(),
        path: path.to_path_buf(),
    };
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(missing_column)?;
    let index = header
        .iter()
        .position(|cell| cell.to_string().trim() == column)
        .ok_or_else(missing_column)?;

    Ok(rows
        .filter_map(|row| row.get(index))
        .filter(|cell| !matches!(cell, Data::Empty))
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}
