//! Entity type resolution.
//!
//! Encounter-level datasets carry an `encounters_encounterClass` feature;
//! the class observed in the dataset statistics names the entity. Any other
//! dataset describes participants.

use opal_model::{ConceptEntry, DatasetDescriptor, MappingIssue};

/// Resolve the display name of the dataset's entity type.
///
/// Returns `Ok(None)` when the descriptor has no entity-type feature, in
/// which case the default applies without an issue.
pub fn resolve_entity_type(
    descriptor: &DatasetDescriptor,
    feature_name: &str,
) -> Result<Option<String>, MappingIssue> {
    let Some(feature) = descriptor.find_feature(feature_name) else {
        return Ok(None);
    };
    let target = descriptor
        .feature_stats(feature_name)
        .and_then(|stats| stats.first_value())
        .filter(|code| !code.is_blank())
        .ok_or_else(|| MappingIssue::MissingTargetCode {
            feature: feature_name.to_string(),
        })?;

    feature
        .concepts()
        .iter()
        .filter_map(ConceptEntry::as_concept)
        .find(|concept| &concept.code == target)
        .map(|concept| Some(concept.display.clone().unwrap_or_default()))
        .ok_or_else(|| MappingIssue::TargetCodeNotFound {
            feature: feature_name.to_string(),
            code: target.to_string(),
        })
}
