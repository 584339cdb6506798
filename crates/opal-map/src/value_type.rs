//! Value type resolution for a single feature.

use opal_model::{
    ConceptCode, ConceptEntry, DataType, Feature, Lenient, MappingIssue, ValueType, json_kind,
};

/// Resolve the Opal value type of a feature.
///
/// Nominal features take their type from the first concept code: text codes
/// map to `text`, numeric codes to `decimal`. Callers turn an `Err` into the
/// [`ValueType::Error`] sentinel; see [`crate::report::resolve_or_sentinel`].
pub fn resolve_value_type(
    feature_name: &str,
    feature: &Feature,
) -> Result<ValueType, MappingIssue> {
    let declared = match feature.data_type.as_ref() {
        Some(Lenient::Valid(text)) if !text.trim().is_empty() => text.trim(),
        Some(Lenient::Invalid(value)) => {
            return Err(MappingIssue::UnknownDataType {
                feature: feature_name.to_string(),
                data_type: value.to_string(),
            });
        }
        _ => {
            return Err(MappingIssue::MissingDataType {
                feature: feature_name.to_string(),
            });
        }
    };
    let data_type: DataType = declared.parse().map_err(|_| MappingIssue::UnknownDataType {
        feature: feature_name.to_string(),
        data_type: declared.to_uppercase(),
    })?;

    if let Some(value_type) = ValueType::for_data_type(data_type) {
        return Ok(value_type);
    }

    let value_set = match feature.value_set.as_ref() {
        Some(Lenient::Valid(value_set)) => value_set,
        Some(Lenient::Invalid(value)) => {
            return Err(MappingIssue::InvalidValueSet {
                feature: feature_name.to_string(),
                kind: json_kind(value).to_string(),
            });
        }
        None => {
            return Err(MappingIssue::MissingValueSet {
                feature: feature_name.to_string(),
            });
        }
    };
    let Some(first) = value_set.concept.first() else {
        return Err(MappingIssue::EmptyValueSet {
            feature: feature_name.to_string(),
        });
    };
    match first {
        ConceptEntry::Concept(concept) => match &concept.code {
            ConceptCode::Text(_) => Ok(ValueType::Text),
            ConceptCode::Number(_) => Ok(ValueType::Decimal),
            other => Err(MappingIssue::UnsupportedCodeType {
                feature: feature_name.to_string(),
                kind: other.kind().to_string(),
            }),
        },
        ConceptEntry::Malformed { value, .. } => Err(MappingIssue::UnsupportedCodeType {
            feature: feature_name.to_string(),
            kind: format!("malformed concept {value}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        serde_json::from_value(value).expect("feature")
    }

    #[test]
    fn missing_or_blank_data_type_is_an_issue() {
        for value in [
            json!({"name": "x"}),
            json!({"name": "x", "dataType": ""}),
            json!({"name": "x", "dataType": "  "}),
        ] {
            let result = resolve_value_type("x", &feature(value));
            assert_eq!(
                result,
                Err(MappingIssue::MissingDataType {
                    feature: "x".to_string()
                })
            );
        }
    }

    #[test]
    fn scalar_data_types() {
        let cases = [
            ("NUMERIC", ValueType::Decimal),
            ("boolean", ValueType::Boolean),
            ("DateTime", ValueType::Datetime),
        ];
        for (data_type, expected) in cases {
            let result = resolve_value_type("x", &feature(json!({"dataType": data_type})));
            assert_eq!(result, Ok(expected), "{data_type}");
        }
    }

    #[test]
    fn nominal_type_follows_first_code() {
        let text = feature(json!({
            "dataType": "NOMINAL",
            "valueSet": {"concept": [{"code": "5", "display": "Five"}, {"code": 6}]}
        }));
        assert_eq!(resolve_value_type("x", &text), Ok(ValueType::Text));

        let numeric = feature(json!({
            "dataType": "NOMINAL",
            "valueSet": {"concept": [{"code": 5, "display": "Five"}, {"code": "6"}]}
        }));
        assert_eq!(resolve_value_type("x", &numeric), Ok(ValueType::Decimal));

        let missing_code = feature(json!({
            "dataType": "NOMINAL",
            "valueSet": {"concept": [{"display": "Unknown"}]}
        }));
        assert_eq!(resolve_value_type("x", &missing_code), Ok(ValueType::Text));
    }

    #[test]
    fn nominal_failures() {
        let no_value_set = feature(json!({"dataType": "NOMINAL"}));
        assert!(matches!(
            resolve_value_type("x", &no_value_set),
            Err(MappingIssue::MissingValueSet { .. })
        ));

        let empty = feature(json!({"dataType": "NOMINAL", "valueSet": {"concept": []}}));
        assert!(matches!(
            resolve_value_type("x", &empty),
            Err(MappingIssue::EmptyValueSet { .. })
        ));

        let boolean_code = feature(json!({
            "dataType": "NOMINAL",
            "valueSet": {"concept": [{"code": true}]}
        }));
        assert_eq!(
            resolve_value_type("x", &boolean_code),
            Err(MappingIssue::UnsupportedCodeType {
                feature: "x".to_string(),
                kind: "boolean".to_string()
            })
        );

        let malformed = feature(json!({
            "dataType": "NOMINAL",
            "valueSet": {"concept": ["M"]}
        }));
        assert!(matches!(
            resolve_value_type("x", &malformed),
            Err(MappingIssue::UnsupportedCodeType { .. })
        ));
    }

    #[test]
    fn wrongly_typed_fields_are_issues() {
        let numeric_type = feature(json!({"name": "bmi", "dataType": 5}));
        assert_eq!(
            resolve_value_type("bmi", &numeric_type),
            Err(MappingIssue::UnknownDataType {
                feature: "bmi".to_string(),
                data_type: "5".to_string()
            })
        );

        let text_value_set = feature(json!({"dataType": "NOMINAL", "valueSet": "x"}));
        assert_eq!(
            resolve_value_type("x", &text_value_set),
            Err(MappingIssue::InvalidValueSet {
                feature: "x".to_string(),
                kind: "string".to_string()
            })
        );

        let bad_concepts = feature(json!({"dataType": "NOMINAL", "valueSet": {"concept": 3}}));
        assert!(matches!(
            resolve_value_type("x", &bad_concepts),
            Err(MappingIssue::InvalidValueSet { .. })
        ));
    }

    #[test]
    fn unknown_data_type() {
        let result = resolve_value_type("x", &feature(json!({"dataType": "ordinal"})));
        assert_eq!(
            result,
            Err(MappingIssue::UnknownDataType {
                feature: "x".to_string(),
                data_type: "ORDINAL".to_string()
            })
        );
    }
}
