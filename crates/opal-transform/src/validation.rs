//! Advisory validation of table columns against a dictionary.
//!
//! The outcome is reported, never enforced: encoding proceeds whatever the
//! comparison finds, including when the dictionary cannot be read.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use opal_ingest::read_dictionary_names;
use opal_model::VARIABLES_SHEET;

use crate::availability::EncodeOptions;

/// Dictionary column holding variable names.
pub const DICTIONARY_NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Feature columns and dictionary names are the same set.
    Matched,
    Mismatched {
        /// Feature columns with no dictionary entry.
        missing_in_dictionary: Vec<String>,
        /// Dictionary names with no table column.
        missing_in_table: Vec<String>,
    },
    /// The dictionary could not be read.
    Unavailable { reason: String },
}

impl ValidationOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, ValidationOutcome::Matched)
    }

    /// Console lines describing the outcome.
    pub fn report_lines(&self) -> Vec<String> {
        const PROCEEDING: &str = "Proceeding with transformation despite validation errors.";
        match self {
            ValidationOutcome::Matched => {
                vec!["Validation successful: All columns match".to_string()]
            }
            ValidationOutcome::Mismatched {
                missing_in_dictionary,
                missing_in_table,
            } => {
                let mut lines = vec!["Validation errors:".to_string()];
                if !missing_in_dictionary.is_empty() {
                    lines.push(format!(
                        "- Columns missing in dictionary: {}",
                        missing_in_dictionary.join(", ")
                    ));
                }
                if !missing_in_table.is_empty() {
                    lines.push(format!(
                        "- Columns missing in table: {}",
                        missing_in_table.join(", ")
                    ));
                }
                lines.push(PROCEEDING.to_string());
                lines
            }
            ValidationOutcome::Unavailable { reason } => vec![
                format!("Validation error: {reason}"),
                PROCEEDING.to_string(),
            ],
        }
    }
}

/// Compare feature columns (identifiers excluded) with dictionary names.
pub fn compare_columns(
    table_columns: &[String],
    dictionary_names: &[String],
    options: &EncodeOptions,
) -> ValidationOutcome {
    let features: BTreeSet<&str> = table_columns
        .iter()
        .map(String::as_str)
        .filter(|column| !options.is_identifier(column))
        .collect();
    let dictionary: BTreeSet<&str> = dictionary_names.iter().map(String::as_str).collect();

    let missing_in_dictionary: Vec<String> = features
        .difference(&dictionary)
        .map(|name| (*name).to_string())
        .collect();
    let missing_in_table: Vec<String> = dictionary
        .difference(&features)
        .map(|name| (*name).to_string())
        .collect();

    if missing_in_dictionary.is_empty() && missing_in_table.is_empty() {
        ValidationOutcome::Matched
    } else {
        ValidationOutcome::Mismatched {
            missing_in_dictionary,
            missing_in_table,
        }
    }
}

/// Validate table columns against the `Variables` sheet of a dictionary.
pub fn validate_against_dictionary(
    table_columns: &[String],
    dictionary_path: &Path,
    options: &EncodeOptions,
) -> ValidationOutcome {
    let outcome =
        match read_dictionary_names(dictionary_path, VARIABLES_SHEET, DICTIONARY_NAME_COLUMN) {
            Ok(names) => compare_columns(table_columns, &names, options),
            Err(error) => ValidationOutcome::Unavailable {
                reason: error.to_string(),
            },
        };
    match &outcome {
        ValidationOutcome::Matched => info!(
            dictionary = %dictionary_path.display(),
            "dictionary validation passed"
        ),
        ValidationOutcome::Mismatched {
            missing_in_dictionary,
            missing_in_table,
        } => warn!(
            dictionary = %dictionary_path.display(),
            missing_in_dictionary = missing_in_dictionary.len(),
            missing_in_table = missing_in_table.len(),
            "dictionary validation found mismatches"
        ),
        ValidationOutcome::Unavailable { reason } => warn!(
            dictionary = %dictionary_path.display(),
            %reason,
            "dictionary validation skipped"
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_symmetric_difference() {
        let outcome = compare_columns(
            &strings(&["pid", "a", "b"]),
            &strings(&["a", "c"]),
            &EncodeOptions::default(),
        );
        assert_eq!(
            outcome,
            ValidationOutcome::Mismatched {
                missing_in_dictionary: strings(&["b"]),
                missing_in_table: strings(&["c"]),
            }
        );
        assert_eq!(
            outcome.report_lines(),
            vec![
                "Validation errors:",
                "- Columns missing in dictionary: b",
                "- Columns missing in table: c",
                "Proceeding with transformation despite validation errors.",
            ]
        );
    }

    #[test]
    fn test_identifiers_are_ignored() {
        let outcome = compare_columns(
            &strings(&["pid", "encounterId", "eventTime", "a"]),
            &strings(&["a"]),
            &EncodeOptions::default(),
        );
        assert!(outcome.is_matched());
        assert_eq!(
            outcome.report_lines(),
            vec!["Validation successful: All columns match"]
        );
    }

    #[test]
    fn test_one_sided_mismatch() {
        let outcome = compare_columns(
            &strings(&["a"]),
            &strings(&["a", "b", "c"]),
            &EncodeOptions::default(),
        );
        assert_eq!(
            outcome.report_lines(),
            vec![
                "Validation errors:",
                "- Columns missing in table: b, c",
                "Proceeding with transformation despite validation errors.",
            ]
        );
    }

    #[test]
    fn test_unreadable_dictionary_is_reported() {
        let outcome = validate_against_dictionary(
            &strings(&["a"]),
            Path::new("/nonexistent/dictionary.xlsx"),
            &EncodeOptions::default(),
        );
        let ValidationOutcome::Unavailable { reason } = &outcome else {
            panic!("expected unavailable outcome, got {outcome:?}");
        };
        assert!(reason.contains("/nonexistent/dictionary.xlsx"));
        assert_eq!(outcome.report_lines().len(), 2);
    }
}
