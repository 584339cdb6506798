use std::path::PathBuf;

use opal_map::MappingReport;
use opal_transform::ValidationOutcome;

/// Result of an `encode` run.
#[derive(Debug)]
pub struct EncodeResult {
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Feature columns turned into indicators.
    pub encoded_columns: usize,
    /// Dictionary check outcome, when a dictionary was given.
    pub validation: Option<ValidationOutcome>,
}

/// Result of a `map` run.
#[derive(Debug)]
pub struct MapResult {
    pub output: PathBuf,
    pub report: MappingReport,
}

/// Result of a `convert` run.
#[derive(Debug)]
pub struct ConvertResult {
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
}
