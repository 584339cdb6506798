//! Variable extraction.

use opal_model::{DatasetDescriptor, FeatureEntry, MappingIssue, VariableRow};

use crate::report::{IssueLog, resolve_or_sentinel};

/// Build one variable row per feature, then one per outcome.
///
/// Entries without a name, and malformed entries, are recorded in `issues`
/// and skipped.
pub fn extract_variables(
    descriptor: &DatasetDescriptor,
    table: &str,
    entity_type: &str,
    issues: &mut IssueLog,
) -> Vec<VariableRow> {
    let sections = [
        ("features", &descriptor.features),
        ("outcomes", &descriptor.outcomes),
    ];
    let mut rows = Vec::with_capacity(descriptor.features.len() + descriptor.outcomes.len());
    for (section, entries) in sections {
        for (index, entry) in entries.iter().enumerate() {
            let feature = match entry {
                FeatureEntry::Feature(feature) => feature,
                FeatureEntry::Malformed { reason, .. } => {
                    issues.record(MappingIssue::MalformedFeature {
                        section,
                        index,
                        reason: reason.clone(),
                    });
                    continue;
                }
            };
            let Some(name) = feature.name.as_deref() else {
                issues.record(MappingIssue::MissingName { section, index });
                continue;
            };
            rows.push(VariableRow {
                table: table.to_string(),
                name: name.to_string(),
                value_type: resolve_or_sentinel(name, feature, issues),
                entity_type: entity_type.to_string(),
                unit: String::new(),
                label: feature.label(),
                script: VariableRow::script_for(name),
            });
        }
    }
    rows
}
