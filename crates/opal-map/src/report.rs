//! Whole-dataset mapping and its report.

use std::collections::BTreeMap;

use tracing::{error, info, info_span};

use opal_model::{
    CategoryRow, DEFAULT_ENTITY_TYPE, DatasetDescriptor, Feature, IssueStage, MappingIssue,
    ValueType, VariableRow,
};

use crate::categories::extract_categories;
use crate::entity_type::resolve_entity_type;
use crate::value_type::resolve_value_type;
use crate::variables::extract_variables;

/// Feature whose observed class names the entity type.
pub const ENTITY_TYPE_FEATURE: &str = "encounters_encounterClass";

/// Options for mapping one dataset.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Opal table name written on every row.
    pub table_name: String,
    /// Feature consulted by the entity-type resolver.
    pub entity_type_feature: String,
    /// Entity type used when none can be derived.
    pub default_entity_type: String,
}

impl MapOptions {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            entity_type_feature: ENTITY_TYPE_FEATURE.to_string(),
            default_entity_type: DEFAULT_ENTITY_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_entity_type_feature(mut self, feature: impl Into<String>) -> Self {
        self.entity_type_feature = feature.into();
        self
    }

    #[must_use]
    pub fn with_default_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.default_entity_type = entity_type.into();
        self
    }
}

/// Collects per-record issues, logging each one as it arrives.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<MappingIssue>,
}

impl IssueLog {
    pub fn record(&mut self, issue: MappingIssue) {
        error!(
            stage = issue.stage().as_str(),
            feature = issue.feature().unwrap_or("-"),
            "{issue}"
        );
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn into_vec(self) -> Vec<MappingIssue> {
        self.issues
    }
}

/// Resolve a feature's value type, recording a failure and returning the
/// `error` sentinel instead.
pub fn resolve_or_sentinel(name: &str, feature: &Feature, issues: &mut IssueLog) -> ValueType {
    resolve_value_type(name, feature).unwrap_or_else(|issue| {
        issues.record(issue);
        ValueType::Error
    })
}

/// Result of mapping one dataset descriptor.
#[derive(Debug, Clone)]
pub struct MappingReport {
    pub entity_type: String,
    pub variables: Vec<VariableRow>,
    pub categories: Vec<CategoryRow>,
    pub issues: Vec<MappingIssue>,
}

impl MappingReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Variables written with the `error` value type.
    pub fn unresolved_count(&self) -> usize {
        self.variables
            .iter()
            .filter(|row| row.value_type == ValueType::Error)
            .count()
    }

    pub fn issues_by_stage(&self) -> BTreeMap<IssueStage, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.stage()).or_insert(0) += 1;
        }
        counts
    }
}

/// Map a dataset descriptor to dictionary rows.
///
/// Never fails: every per-record problem ends up in [`MappingReport::issues`].
pub fn map_dataset(descriptor: &DatasetDescriptor, options: &MapOptions) -> MappingReport {
    let span = info_span!("map", table = %options.table_name);
    let _guard = span.enter();

    let mut issues = IssueLog::default();
    let entity_type = match resolve_entity_type(descriptor, &options.entity_type_feature) {
        Ok(Some(entity_type)) => entity_type,
        Ok(None) => options.default_entity_type.clone(),
        Err(issue) => {
            issues.record(issue);
            options.default_entity_type.clone()
        }
    };
    let variables = extract_variables(descriptor, &options.table_name, &entity_type, &mut issues);
    let categories = extract_categories(descriptor, &options.table_name, &mut issues);

    info!(
        entity_type = %entity_type,
        variables = variables.len(),
        categories = categories.len(),
        issues = issues.len(),
        "mapping complete"
    );
    MappingReport {
        entity_type,
        variables,
        categories,
        issues: issues.into_vec(),
    }
}
