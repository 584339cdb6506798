//! Type-safe enumerations for descriptor and dictionary values.
//!
//! Descriptor files carry these as free-form strings; the enums give the
//! mapper a closed set to match on.

use std::fmt;
use std::str::FromStr;

/// Feature data type as declared by a dataset descriptor (`dataType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Categorical: legal values are enumerated in the feature's value set.
    Nominal,
    Numeric,
    Boolean,
    Datetime,
}

impl DataType {
    /// Returns the canonical upper-case name used in descriptor files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Nominal => "NOMINAL",
            DataType::Numeric => "NUMERIC",
            DataType::Boolean => "BOOLEAN",
            DataType::Datetime => "DATETIME",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    /// Parse a descriptor `dataType` value (case-insensitive, trimmed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NOMINAL" => Ok(DataType::Nominal),
            "NUMERIC" => Ok(DataType::Numeric),
            "BOOLEAN" => Ok(DataType::Boolean),
            "DATETIME" => Ok(DataType::Datetime),
            _ => Err(format!("Unknown dataType: {}", s.trim().to_uppercase())),
        }
    }
}

/// Opal variable value type written to the `valueType` column.
///
/// `Error` is the sentinel emitted when a feature's type cannot be resolved;
/// it is written verbatim so reviewers can search the workbook for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Text,
    Decimal,
    Boolean,
    Datetime,
    Error,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Decimal => "decimal",
            ValueType::Boolean => "boolean",
            ValueType::Datetime => "datetime",
            ValueType::Error => "error",
        }
    }

    /// Value type for a non-nominal data type.
    pub fn for_data_type(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Nominal => None,
            DataType::Numeric => Some(ValueType::Decimal),
            DataType::Boolean => Some(ValueType::Boolean),
            DataType::Datetime => Some(ValueType::Datetime),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
