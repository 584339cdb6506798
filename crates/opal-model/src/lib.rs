//! Data model for dataset descriptors and Opal data dictionaries.

pub mod descriptor;
pub mod dictionary;
pub mod enums;
pub mod issue;

pub use descriptor::{
    Concept, ConceptCode, ConceptEntry, DatasetDescriptor, DatasetStats, Feature, FeatureEntry,
    FeatureStats, Lenient, ValueSet, json_kind,
};
pub use dictionary::{
    CATEGORIES_SHEET, CATEGORY_COLUMNS, CategoryRow, DEFAULT_ENTITY_TYPE, VARIABLE_COLUMNS,
    VARIABLES_SHEET, VariableRow,
};
pub use enums::{DataType, ValueType};
pub use issue::{IssueStage, MappingIssue};

/// Columns that identify a row rather than describe a feature.
pub const IDENTIFIER_COLUMNS: [&str; 5] = [
    "pid",
    "encounterId",
    "referenceTimePoint",
    "eventTime",
    "exitTime",
];
