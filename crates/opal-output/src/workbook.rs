//! Opal dictionary workbook output.
//!
//! Layout:
//!
//! ```text
//! Variables:  table | name | valueType | entityType | unit | label:en | script
//! Categories: table | variable | name | code | missing | label:en
//! ```
//!
//! Empty strings are left as blank cells. Numeric concept codes are written
//! as numbers so Opal keeps their type.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use opal_model::{
    CATEGORIES_SHEET, CATEGORY_COLUMNS, CategoryRow, ConceptCode, VARIABLE_COLUMNS,
    VARIABLES_SHEET, VariableRow,
};

use crate::error::{OutputError, Result};
use crate::table::ensure_parent_dir;

/// Write the `Variables` and `Categories` sheets to `path`.
///
/// The workbook is built in memory first, so nothing is written when
/// building fails.
pub fn write_dictionary_workbook(
    variables: &[VariableRow],
    categories: &[CategoryRow],
    path: &Path,
) -> Result<()> {
    let bytes = build_workbook(variables, categories).map_err(|e| OutputError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|source| OutputError::from_io(path, source))?;
    debug!(
        path = %path.display(),
        variables = variables.len(),
        categories = categories.len(),
        "dictionary workbook written"
    );
    Ok(())
}

fn build_workbook(
    variables: &[VariableRow],
    categories: &[CategoryRow],
) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(VARIABLES_SHEET)?;
    write_header(sheet, &VARIABLE_COLUMNS, &header)?;
    for (index, row) in variables.iter().enumerate() {
        let line = sheet_row(index);
        write_text(sheet, line, 0, &row.table)?;
        write_text(sheet, line, 1, &row.name)?;
        write_text(sheet, line, 2, row.value_type.as_str())?;
        write_text(sheet, line, 3, &row.entity_type)?;
        write_text(sheet, line, 4, &row.unit)?;
        write_text(sheet, line, 5, &row.label)?;
        write_text(sheet, line, 6, &row.script)?;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet();
    sheet.set_name(CATEGORIES_SHEET)?;
    write_header(sheet, &CATEGORY_COLUMNS, &header)?;
    for (index, row) in categories.iter().enumerate() {
        let line = sheet_row(index);
        write_text(sheet, line, 0, &row.table)?;
        write_text(sheet, line, 1, &row.variable)?;
        write_code(sheet, line, 2, &row.code)?;
        write_text(sheet, line, 3, &row.blank_code)?;
        sheet.write_number(line, 4, row.missing)?;
        write_text(sheet, line, 5, &row.label)?;
    }
    sheet.autofit();

    workbook.save_to_buffer()
}

/// Worksheet row for the `index`-th data row (row 0 is the header).
fn sheet_row(index: usize) -> u32 {
    (index + 1) as u32
}

fn write_header(
    sheet: &mut Worksheet,
    columns: &[&str],
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, format)?;
    }
    Ok(())
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
) -> std::result::Result<(), XlsxError> {
    if !value.is_empty() {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn write_code(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    code: &ConceptCode,
) -> std::result::Result<(), XlsxError> {
    match code {
        ConceptCode::Number(number) => match number.as_f64() {
            Some(value) => {
                sheet.write_number(row, col, value)?;
            }
            None => write_text(sheet, row, col, &number.to_string())?,
        },
        other => write_text(sheet, row, col, &other.to_string())?,
    }
    Ok(())
}
