//! Dataset metadata descriptor records.
//!
//! A descriptor file holds one or more dataset entries; each entry lists its
//! `features` and `outcomes` together with summary statistics:
//!
//! ```text
//! entry
//! ├── features[]  ── valueSet.concept[] (code, display)
//! ├── outcomes[]  ── valueSet.concept[] (code, display)
//! └── datasetStats.featureStats{name -> valueSet[]}
//! ```
//!
//! Every record field is optional so a missing key surfaces where it is
//! read, not as a parse failure of the whole file. Fields holding the wrong
//! JSON type are kept as [`Lenient::Invalid`] so the mapper can report them
//! against the feature. Entries that are not objects, or whose `name` is not
//! a string, are kept as `Malformed` and skipped.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::enums::DataType;

/// One dataset entry of a descriptor document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetDescriptor {
    pub features: Vec<FeatureEntry>,
    pub outcomes: Vec<FeatureEntry>,
    #[serde(default, rename = "datasetStats")]
    pub dataset_stats: Option<Lenient<DatasetStats>>,
}

impl DatasetDescriptor {
    /// Well-formed feature with the given name, searching `features` only.
    pub fn find_feature(&self, name: &str) -> Option<&Feature> {
        self.features
            .iter()
            .filter_map(FeatureEntry::as_feature)
            .find(|feature| feature.name.as_deref() == Some(name))
    }

    /// Summary statistics recorded for a feature; `None` when absent or
    /// not shaped as expected.
    pub fn feature_stats(&self, name: &str) -> Option<&FeatureStats> {
        self.dataset_stats
            .as_ref()?
            .valid()?
            .feature_stats
            .get(name)?
            .valid()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatasetStats {
    #[serde(default, rename = "featureStats")]
    pub feature_stats: BTreeMap<String, Lenient<FeatureStats>>,
}

/// Statistics for one feature. Only the observed value set is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureStats {
    #[serde(default, rename = "valueSet")]
    pub value_set: Option<Lenient<Vec<ConceptCode>>>,
}

impl FeatureStats {
    pub fn first_value(&self) -> Option<&ConceptCode> {
        self.value_set.as_ref()?.valid()?.first()
    }
}

/// A field value that either decoded as `T` or is kept as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(Value),
}

impl<T> Lenient<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value::<T>(value.clone()) {
            Ok(decoded) => Lenient::Valid(decoded),
            Err(_) => Lenient::Invalid(value),
        })
    }
}

/// A `features`/`outcomes` list item.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureEntry {
    Feature(Feature),
    Malformed { reason: String, value: Value },
}

impl FeatureEntry {
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return FeatureEntry::Malformed {
                reason: format!("expected an object, found {}", json_kind(&value)),
                value,
            };
        }
        match serde_json::from_value::<Feature>(value.clone()) {
            Ok(feature) => FeatureEntry::Feature(feature),
            Err(error) => FeatureEntry::Malformed {
                reason: error.to_string(),
                value,
            },
        }
    }

    pub fn as_feature(&self) -> Option<&Feature> {
        match self {
            FeatureEntry::Feature(feature) => Some(feature),
            FeatureEntry::Malformed { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for FeatureEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FeatureEntry::from_value)
    }
}

/// A single feature (or outcome) descriptor.
///
/// `name` must be a string; every other field tolerates a wrong JSON type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub name: Option<String>,
    pub data_type: Option<Lenient<String>>,
    pub value_set: Option<Lenient<ValueSet>>,
    pub description: Option<Lenient<String>>,
    pub generated_description: Option<Lenient<Vec<Value>>>,
}

impl Feature {
    /// Declared `dataType`, trimmed; `None` when absent, blank or not text.
    pub fn declared_type(&self) -> Option<&str> {
        self.data_type
            .as_ref()?
            .valid()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// The value set, when present and well formed.
    pub fn value_set(&self) -> Option<&ValueSet> {
        self.value_set.as_ref()?.valid()
    }

    pub fn parsed_type(&self) -> Option<DataType> {
        self.declared_type()?.parse().ok()
    }

    pub fn is_nominal(&self) -> bool {
        self.parsed_type() == Some(DataType::Nominal)
    }

    /// Concepts of the value set; empty when there is no value set.
    pub fn concepts(&self) -> &[ConceptEntry] {
        self.value_set()
            .map(|value_set| value_set.concept.as_slice())
            .unwrap_or_default()
    }

    /// English label: description followed by the generated description words.
    ///
    /// Parts with the wrong JSON type are left out.
    pub fn label(&self) -> String {
        let description = self
            .description
            .as_ref()
            .and_then(Lenient::valid)
            .map(String::as_str)
            .unwrap_or_default();
        let generated = self
            .generated_description
            .as_ref()
            .and_then(Lenient::valid)
            .map(|words| {
                words
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        format!("{description} {generated}").trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValueSet {
    #[serde(default)]
    pub concept: Vec<ConceptEntry>,
}

/// A `valueSet.concept` list item.
#[derive(Debug, Clone, PartialEq)]
pub enum ConceptEntry {
    Concept(Concept),
    Malformed { reason: String, value: Value },
}

impl ConceptEntry {
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return ConceptEntry::Malformed {
                reason: format!("expected an object, found {}", json_kind(&value)),
                value,
            };
        }
        match serde_json::from_value::<Concept>(value.clone()) {
            Ok(concept) => ConceptEntry::Concept(concept),
            Err(error) => ConceptEntry::Malformed {
                reason: error.to_string(),
                value,
            },
        }
    }

    pub fn as_concept(&self) -> Option<&Concept> {
        match self {
            ConceptEntry::Concept(concept) => Some(concept),
            ConceptEntry::Malformed { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for ConceptEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ConceptEntry::from_value)
    }
}

/// A code/label pair of a categorical feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Concept {
    #[serde(default)]
    pub code: ConceptCode,
    pub display: Option<String>,
}

/// A concept code as found in the descriptor.
///
/// Codes are usually strings or numbers; anything else is carried as-is so
/// the type resolver can report it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConceptCode {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

impl ConceptCode {
    /// JSON type name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConceptCode::Text(_) => "string",
            ConceptCode::Number(_) => "number",
            ConceptCode::Other(value) => json_kind(value),
        }
    }

    /// True for codes that cannot identify a concept (null or empty text).
    pub fn is_blank(&self) -> bool {
        match self {
            ConceptCode::Text(text) => text.is_empty(),
            ConceptCode::Number(_) => false,
            ConceptCode::Other(value) => value.is_null(),
        }
    }
}

impl Default for ConceptCode {
    fn default() -> Self {
        ConceptCode::Text(String::new())
    }
}

impl fmt::Display for ConceptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConceptCode::Text(text) => write!(f, "{text}"),
            ConceptCode::Number(number) => write!(f, "{number}"),
            ConceptCode::Other(value) => write!(f, "{value}"),
        }
    }
}

/// JSON type name of a value, used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_entry_keeps_non_objects_as_malformed() {
        let entry = FeatureEntry::from_value(json!(["age"]));
        assert!(matches!(entry, FeatureEntry::Malformed { .. }));

        let entry = FeatureEntry::from_value(json!({"name": 42}));
        assert!(matches!(entry, FeatureEntry::Malformed { .. }));
    }

    #[test]
    fn concept_code_variants() {
        let concept: Concept = serde_json::from_value(json!({"code": "5"})).unwrap();
        assert_eq!(concept.code, ConceptCode::Text("5".to_string()));

        let concept: Concept = serde_json::from_value(json!({"code": 5})).unwrap();
        assert_eq!(concept.code.kind(), "number");
        assert_eq!(concept.code.to_string(), "5");

        let concept: Concept = serde_json::from_value(json!({"code": true})).unwrap();
        assert_eq!(concept.code.kind(), "boolean");

        let concept: Concept = serde_json::from_value(json!({"display": "Male"})).unwrap();
        assert_eq!(concept.code, ConceptCode::default());
        assert!(concept.code.is_blank());
    }

    #[test]
    fn feature_label_joins_descriptions() {
        let feature: Feature = serde_json::from_value(json!({
            "name": "age",
            "description": "Age at admission",
            "generatedDescription": ["in", "years"]
        }))
        .unwrap();
        assert_eq!(feature.label(), "Age at admission in years");

        let bare = Feature::default();
        assert_eq!(bare.label(), "");

        let generated_only: Feature =
            serde_json::from_value(json!({"generatedDescription": ["Heart", "rate"]})).unwrap();
        assert_eq!(generated_only.label(), "Heart rate");
    }

    #[test]
    fn descriptor_finds_features_and_stats() {
        let descriptor: DatasetDescriptor = serde_json::from_value(json!({
            "features": [{"name": "sex", "dataType": "nominal"}, "broken"],
            "outcomes": [],
            "datasetStats": {"featureStats": {"sex": {"valueSet": ["M", "F"]}}}
        }))
        .unwrap();

        let sex = descriptor.find_feature("sex").expect("sex feature");
        assert!(sex.is_nominal());
        assert!(sex.concepts().is_empty());
        assert!(descriptor.find_feature("age").is_none());
        assert!(matches!(
            descriptor.features[1],
            FeatureEntry::Malformed { .. }
        ));

        let stats = descriptor.feature_stats("sex").expect("sex stats");
        assert_eq!(
            stats.first_value(),
            Some(&ConceptCode::Text("M".to_string()))
        );
    }

    #[test]
    fn wrongly_typed_fields_are_kept_as_invalid() {
        let entry = FeatureEntry::from_value(json!({
            "name": "bmi",
            "dataType": 5,
            "valueSet": "x",
            "description": 3,
            "generatedDescription": ["Body", 1, "mass"]
        }));
        let feature = entry.as_feature().expect("named feature");
        assert_eq!(feature.data_type, Some(Lenient::Invalid(json!(5))));
        assert_eq!(feature.declared_type(), None);
        assert!(feature.value_set().is_none());
        assert!(feature.concepts().is_empty());
        assert_eq!(feature.label(), "Body mass");
    }

    #[test]
    fn unexpected_stats_are_not_fatal() {
        let descriptor: DatasetDescriptor = serde_json::from_value(json!({
            "features": [],
            "outcomes": [],
            "datasetStats": {"featureStats": {
                "age": {"valueSet": {"min": 18}},
                "sex": "M",
                "site": {"valueSet": ["A"]}
            }}
        }))
        .unwrap();
        assert!(descriptor.feature_stats("age").is_none());
        assert!(descriptor.feature_stats("sex").is_none());
        assert_eq!(
            descriptor.feature_stats("site").and_then(FeatureStats::first_value),
            Some(&ConceptCode::Text("A".to_string()))
        );
    }
}
