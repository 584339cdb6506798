//! Per-record mapping issues.
//!
//! Issues never abort a run. They are logged when raised and collected into
//! the mapping report so callers can inspect what was skipped or defaulted.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingIssue {
    #[error("Missing dataType for feature {feature}")]
    MissingDataType { feature: String },

    #[error("NOMINAL type requires valueSet for feature {feature}")]
    MissingValueSet { feature: String },

    #[error("NOMINAL type requires concepts in valueSet for feature {feature}")]
    EmptyValueSet { feature: String },

    #[error("Invalid valueSet of type {kind} for feature {feature}")]
    InvalidValueSet { feature: String, kind: String },

    #[error("Unsupported code type {kind} for feature {feature}")]
    UnsupportedCodeType { feature: String, kind: String },

    #[error("Unknown dataType: {data_type} for feature {feature}")]
    UnknownDataType { feature: String, data_type: String },

    #[error("Missing required key 'name' in {section} entry #{index}")]
    MissingName { section: &'static str, index: usize },

    #[error("Malformed {section} entry #{index}: {reason}")]
    MalformedFeature {
        section: &'static str,
        index: usize,
        reason: String,
    },

    #[error("Malformed concept #{index} in feature {feature}: {reason}")]
    MalformedConcept {
        feature: String,
        index: usize,
        reason: String,
    },

    #[error("Cannot find target code at datasetStats.featureStats.{feature}.valueSet")]
    MissingTargetCode { feature: String },

    #[error("target code \"{code}\" not found in the valueSet for feature \"{feature}\"")]
    TargetCodeNotFound { feature: String, code: String },
}

/// Which part of the mapping raised an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueStage {
    EntityType,
    Variables,
    ValueType,
    Categories,
}

impl IssueStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStage::EntityType => "entityType",
            IssueStage::Variables => "variables",
            IssueStage::ValueType => "valueType",
            IssueStage::Categories => "categories",
        }
    }
}

impl MappingIssue {
    pub fn stage(&self) -> IssueStage {
        match self {
            MappingIssue::MissingDataType { .. }
            | MappingIssue::MissingValueSet { .. }
            | MappingIssue::EmptyValueSet { .. }
            | MappingIssue::InvalidValueSet { .. }
            | MappingIssue::UnsupportedCodeType { .. }
            | MappingIssue::UnknownDataType { .. } => IssueStage::ValueType,
            MappingIssue::MissingName { .. } | MappingIssue::MalformedFeature { .. } => {
                IssueStage::Variables
            }
            MappingIssue::MalformedConcept { .. } => IssueStage::Categories,
            MappingIssue::MissingTargetCode { .. } | MappingIssue::TargetCodeNotFound { .. } => {
                IssueStage::EntityType
            }
        }
    }

    /// Feature the issue refers to, when it has a name.
    pub fn feature(&self) -> Option<&str> {
        match self {
            MappingIssue::MissingDataType { feature }
            | MappingIssue::MissingValueSet { feature }
            | MappingIssue::EmptyValueSet { feature }
            | MappingIssue::InvalidValueSet { feature, .. }
            | MappingIssue::UnsupportedCodeType { feature, .. }
            | MappingIssue::UnknownDataType { feature, .. }
            | MappingIssue::MalformedConcept { feature, .. }
            | MappingIssue::MissingTargetCode { feature }
            | MappingIssue::TargetCodeNotFound { feature, .. } => Some(feature),
            MappingIssue::MissingName { .. } | MappingIssue::MalformedFeature { .. } => None,
        }
    }
}
