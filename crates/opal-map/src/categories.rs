//! Category extraction for nominal features.

use opal_model::{CategoryRow, ConceptEntry, DatasetDescriptor, FeatureEntry, MappingIssue};

use crate::report::IssueLog;

/// Build one category row per concept of every nominal feature.
///
/// Outcomes never contribute categories. A concept without `code` or
/// `display` is written with blanks; a malformed concept is recorded and
/// skipped.
pub fn extract_categories(
    descriptor: &DatasetDescriptor,
    table: &str,
    issues: &mut IssueLog,
) -> Vec<CategoryRow> {
    let mut rows = Vec::new();
    for entry in &descriptor.features {
        // Unnamed and malformed entries are reported by the variable extractor.
        let FeatureEntry::Feature(feature) = entry else {
            continue;
        };
        let Some(name) = feature.name.as_deref() else {
            continue;
        };
        if !feature.is_nominal() || feature.value_set().is_none() {
            continue;
        }
        for (concept_index, concept) in feature.concepts().iter().enumerate() {
            match concept {
                ConceptEntry::Concept(concept) => rows.push(CategoryRow {
                    table: table.to_string(),
                    variable: name.to_string(),
                    code: concept.code.clone(),
                    blank_code: String::new(),
                    missing: 0,
                    label: concept.display.clone().unwrap_or_default(),
                }),
                ConceptEntry::Malformed { reason, .. } => {
                    issues.record(MappingIssue::MalformedConcept {
                        feature: name.to_string(),
                        index: concept_index,
                        reason: reason.clone(),
                    });
                }
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use opal_model::ConceptCode;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> DatasetDescriptor {
        serde_json::from_value(value).expect("descriptor")
    }

    #[test]
    fn nominal_concepts_become_rows() {
        let descriptor = descriptor(json!({
            "features": [{
                "name": "sex",
                "dataType": "NOMINAL",
                "valueSet": {"concept": [
                    {"code": "M", "display": "Male"},
                    {"code": "F", "display": "Female"}
                ]}
            }],
            "outcomes": []
        }));
        let mut issues = IssueLog::default();
        let rows = extract_categories(&descriptor, "demo", &mut issues);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, ConceptCode::Text("M".to_string()));
        assert_eq!(rows[0].label, "Male");
        assert_eq!(rows[1].code, ConceptCode::Text("F".to_string()));
        assert_eq!(rows[1].label, "Female");
        assert!(rows.iter().all(|row| row.missing == 0));
        assert!(rows.iter().all(|row| row.variable == "sex" && row.table == "demo"));
        assert!(rows.iter().all(|row| row.blank_code.is_empty()));
        assert!(issues.is_empty());
    }

    #[test]
    fn non_nominal_and_outcomes_are_ignored() {
        let descriptor = descriptor(json!({
            "features": [
                {"name": "age", "dataType": "NUMERIC", "valueSet": {"concept": [{"code": 1}]}},
                {"name": "smoker", "dataType": "nominal"}
            ],
            "outcomes": [{
                "name": "status",
                "dataType": "NOMINAL",
                "valueSet": {"concept": [{"code": "A", "display": "Alive"}]}
            }]
        }));
        let mut issues = IssueLog::default();
        let rows = extract_categories(&descriptor, "demo", &mut issues);
        assert!(rows.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_fields_default_and_malformed_concepts_skip() {
        let descriptor = descriptor(json!({
            "features": [{
                "name": "grade",
                "dataType": "NOMINAL",
                "valueSet": {"concept": [
                    {"code": 1},
                    42,
                    {"display": "Unknown"}
                ]}
            }],
            "outcomes": []
        }));
        let mut issues = IssueLog::default();
        let rows = extract_categories(&descriptor, "demo", &mut issues);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code.to_string(), "1");
        assert_eq!(rows[0].label, "");
        assert_eq!(rows[1].code.to_string(), "");
        assert_eq!(rows[1].label, "Unknown");

        let issues = issues.into_vec();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            MappingIssue::MalformedConcept { feature, index: 1, .. } if feature == "grade"
        ));
    }
}
