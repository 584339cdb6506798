//! Availability encoding.
//!
//! Every feature column is replaced by a 0/1 indicator telling whether the
//! cell holds a value. Identifier columns are passed through so rows stay
//! joinable with the source table.

use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::debug;

use opal_model::IDENTIFIER_COLUMNS;

/// Options for availability encoding and column validation.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Columns copied unchanged and excluded from validation.
    pub identifier_columns: BTreeSet<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            identifier_columns: IDENTIFIER_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl EncodeOptions {
    /// Replace the identifier column set.
    #[must_use]
    pub fn with_identifier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_identifier(&self, column: &str) -> bool {
        self.identifier_columns.contains(column)
    }
}

/// Encode every non-identifier column as a presence indicator.
///
/// Column order and row count are preserved.
pub fn encode_availability(df: &DataFrame, options: &EncodeOptions) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            if options.is_identifier(column.name().as_str()) {
                Ok(column.clone())
            } else {
                presence_indicator(column)
            }
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    debug!(
        rows = df.height(),
        columns = columns.len(),
        identifiers = columns
            .iter()
            .filter(|column| options.is_identifier(column.name().as_str()))
            .count(),
        "availability encoded"
    );
    DataFrame::new(columns)
}

/// Int32 column holding 1 where the cell has a value and 0 otherwise.
///
/// Nulls, empty strings and floating-point NaN count as absent. Categorical
/// columns are judged by their text.
pub fn presence_indicator(column: &Column) -> PolarsResult<Column> {
    let dtype = column.dtype();
    let flags: Vec<i32> = match dtype {
        _ if dtype.is_string() || dtype.is_categorical() || dtype.is_enum() => column
            .cast(&DataType::String)?
            .str()?
            .iter()
            .map(|value| i32::from(value.is_some_and(|text| !text.is_empty())))
            .collect(),
        DataType::Float32 | DataType::Float64 => column
            .cast(&DataType::Float64)?
            .f64()?
            .iter()
            .map(|value| i32::from(value.is_some_and(|number| !number.is_nan())))
            .collect(),
        _ => column
            .is_not_null()
            .iter()
            .map(|present| i32::from(present.unwrap_or(false)))
            .collect(),
    };
    Ok(Column::new(column.name().clone(), flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator_values(column: &Column) -> Vec<Option<i32>> {
        column.i32().unwrap().iter().collect()
    }

    #[test]
    fn test_string_indicator() {
        let column = Column::new("a".into(), vec![None, Some("x"), Some("")]);
        let encoded = presence_indicator(&column).unwrap();
        assert_eq!(encoded.name().as_str(), "a");
        assert_eq!(indicator_values(&encoded), vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_categorical_indicator() {
        let column = Column::new("ward".into(), vec![None, Some("x"), Some("")])
            .cast(&DataType::from_categories(Categories::global()))
            .unwrap();
        assert!(column.dtype().is_categorical());
        let encoded = presence_indicator(&column).unwrap();
        assert_eq!(indicator_values(&encoded), vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_numeric_indicator() {
        let column = Column::new("hr".into(), vec![Some(72i64), None, Some(0)]);
        let encoded = presence_indicator(&column).unwrap();
        assert_eq!(indicator_values(&encoded), vec![Some(1), Some(0), Some(1)]);

        let column = Column::new("temp".into(), vec![Some(36.6f64), Some(f64::NAN), None]);
        let encoded = presence_indicator(&column).unwrap();
        assert_eq!(indicator_values(&encoded), vec![Some(1), Some(0), Some(0)]);
    }

    #[test]
    fn test_boolean_indicator() {
        let column = Column::new("flag".into(), vec![Some(false), None]);
        let encoded = presence_indicator(&column).unwrap();
        assert_eq!(indicator_values(&encoded), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_default_identifiers() {
        let options = EncodeOptions::default();
        for column in ["pid", "encounterId", "referenceTimePoint", "eventTime", "exitTime"] {
            assert!(options.is_identifier(column), "{column}");
        }
        assert!(!options.is_identifier("PID"));

        let custom = EncodeOptions::default().with_identifier_columns(["subject"]);
        assert!(custom.is_identifier("subject"));
        assert!(!custom.is_identifier("pid"));
    }
}
