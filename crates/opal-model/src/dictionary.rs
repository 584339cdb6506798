//! Opal data dictionary rows.
//!
//! A dictionary workbook has two sheets. `Variables` holds one row per
//! feature; `Categories` holds one row per concept of each nominal feature.

use crate::descriptor::ConceptCode;
use crate::enums::ValueType;

pub const VARIABLES_SHEET: &str = "Variables";
pub const CATEGORIES_SHEET: &str = "Categories";

/// Header of the `Variables` sheet.
pub const VARIABLE_COLUMNS: [&str; 7] = [
    "table",
    "name",
    "valueType",
    "entityType",
    "unit",
    "label:en",
    "script",
];

/// Header of the `Categories` sheet.
///
/// The third column is labelled `name` but holds the concept code while the
/// `code` column stays blank. Opal imports depend on this layout.
pub const CATEGORY_COLUMNS: [&str; 6] = [
    "table",
    "variable",
    "name",
    "code",
    "missing",
    "label:en",
];

/// Entity type used when the descriptor does not derive one.
pub const DEFAULT_ENTITY_TYPE: &str = "participant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRow {
    pub table: String,
    pub name: String,
    pub value_type: ValueType,
    pub entity_type: String,
    pub unit: String,
    pub label: String,
    pub script: String,
}

impl VariableRow {
    /// Opal script reading the source column of the same name.
    pub fn script_for(name: &str) -> String {
        format!("$('{name}')")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub table: String,
    pub variable: String,
    /// Written under the `name` header.
    pub code: ConceptCode,
    /// Written under the `code` header; always blank.
    pub blank_code: String,
    pub missing: u8,
    pub label: String,
}
