//! Dataset descriptor loading with structural validation.
//!
//! Structural problems (unreadable file, bad JSON, missing sections) fail the
//! load. Problems inside individual features are left for the mapper, which
//! reports and skips them.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use opal_model::DatasetDescriptor;

use crate::error::{IngestError, Result};

const REQUIRED_SECTIONS: [&str; 2] = ["features", "outcomes"];

/// Load the first dataset entry of a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<DatasetDescriptor> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|e| IngestError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let descriptor = parse_descriptor(document)?;
    debug!(
        path = %path.display(),
        features = descriptor.features.len(),
        outcomes = descriptor.outcomes.len(),
        "descriptor loaded"
    );
    Ok(descriptor)
}

/// Validate the document shape and decode its first entry.
pub fn parse_descriptor(document: Value) -> Result<DatasetDescriptor> {
    let Value::Object(mut root) = document else {
        return Err(IngestError::MissingEntries);
    };
    let entries = root.remove("entries").ok_or(IngestError::MissingEntries)?;
    let Value::Array(entries) = entries else {
        return Err(IngestError::EmptyEntries);
    };
    let first = entries.into_iter().next().ok_or(IngestError::EmptyEntries)?;
    let Some(entry) = first.as_object() else {
        return Err(IngestError::EntryNotObject);
    };
    for section in REQUIRED_SECTIONS {
        if !entry.contains_key(section) {
            return Err(IngestError::MissingSection { section });
        }
    }
    serde_json::from_value(first).map_err(|e| IngestError::InvalidStructure {
        message: e.to_string(),
    })
}
