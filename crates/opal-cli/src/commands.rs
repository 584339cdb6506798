//! Subcommand implementations.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use opal_ingest::{column_names, load_descriptor, read_table};
use opal_map::{MapOptions, map_dataset};
use opal_output::{write_csv, write_dictionary_workbook};
use opal_transform::{EncodeOptions, encode_availability, validate_against_dictionary};

use crate::cli::{ConvertArgs, EncodeArgs, MapArgs};
use crate::summary::print_validation;
use crate::types::{ConvertResult, EncodeResult, MapResult};

/// Encode a feature table as availability indicators.
///
/// Dictionary check lines are printed before encoding starts. A mismatch
/// never stops the output from being written.
pub fn run_encode(args: &EncodeArgs) -> Result<EncodeResult> {
    let span = info_span!("encode", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = read_table(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let options = EncodeOptions::default();

    let validation = args
        .dictionary
        .as_deref()
        .map(|path| validate_against_dictionary(&column_names(&df), path, &options));
    if let Some(outcome) = &validation {
        print_validation(outcome);
    }

    let mut encoded = encode_availability(&df, &options).context("failed to encode availability")?;
    write_csv(&mut encoded, &args.output)?;

    let encoded_columns = column_names(&encoded)
        .iter()
        .filter(|name| !options.is_identifier(name))
        .count();
    info!(
        output = %args.output.display(),
        rows = encoded.height(),
        encoded_columns,
        duration_ms = start.elapsed().as_millis(),
        "availability table written"
    );
    Ok(EncodeResult {
        output: args.output.clone(),
        rows: encoded.height(),
        columns: encoded.width(),
        encoded_columns,
        validation,
    })
}

/// Build an Opal dictionary workbook from a dataset descriptor.
///
/// Errors carry the underlying message unchanged; the caller prints it as
/// `Error: <message>`.
pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    let span = info_span!("map_command", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let descriptor = load_descriptor(&args.input)?;
    let report = map_dataset(&descriptor, &MapOptions::new(args.table_name.as_str()));
    write_dictionary_workbook(&report.variables, &report.categories, &args.output)?;

    info!(
        output = %args.output.display(),
        variables = report.variables.len(),
        categories = report.categories.len(),
        issues = report.issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "dictionary workbook written"
    );
    Ok(MapResult {
        output: args.output.clone(),
        report,
    })
}

/// Convert a table to CSV without touching its values.
pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut df = read_table(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    write_csv(&mut df, &args.output)?;

    info!(
        output = %args.output.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "csv written"
    );
    Ok(ConvertResult {
        output: args.output.clone(),
        rows: df.height(),
        columns: df.width(),
    })
}
