//! CLI argument definitions for the Opal conversion tools.

use std::fmt;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Usage examples appended to the `map` help.
pub const MAP_EXAMPLES: &str = "\
Examples:
  Basic conversion:
  opal-tools map metadataDataset.json obibaDict.xlsx \"my_table_name\"

  Help message:
  opal-tools map -h";

#[derive(Parser)]
#[command(
    name = "opal-tools",
    version,
    about = "Opal dictionary and availability tools",
    long_about = "Convert dataset metadata and feature tables for OBiBa Opal.\n\n\
                  Builds Opal data dictionaries from dataset descriptors, encodes\n\
                  feature tables as availability indicators and converts tables to CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a feature table into a 0/1 availability table.
    #[command(
        arg_required_else_help = true,
        override_usage = "opal-tools encode input.parquet output.csv [--dictionary metadata.xlsx]"
    )]
    Encode(EncodeArgs),

    /// Convert a dataset metadata descriptor into an Opal dictionary workbook.
    #[command(arg_required_else_help = true, after_help = MAP_EXAMPLES)]
    Map(MapArgs),

    /// Convert a table to CSV.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// Path to the input feature table (Parquet or CSV).
    #[arg(value_name = "INPUT_TABLE")]
    pub input: PathBuf,

    /// Path to the output CSV file.
    #[arg(value_name = "OUTPUT_TABLE")]
    pub output: PathBuf,

    /// Optional Opal dictionary workbook to check the table columns against.
    #[arg(long = "dictionary", value_name = "XLSX")]
    pub dictionary: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the input dataset metadata JSON file.
    #[arg(value_name = "INPUT_JSON")]
    pub input: PathBuf,

    /// Path to the output Opal dictionary workbook (XLSX).
    #[arg(value_name = "OUTPUT_XLSX")]
    pub output: PathBuf,

    /// Name of the Opal table to create.
    #[arg(value_name = "TABLE_NAME")]
    pub table_name: String,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input table path (Parquet or CSV).
    #[arg(value_name = "INPUT_TABLE")]
    pub input: PathBuf,

    /// Output CSV file path.
    #[arg(value_name = "OUTPUT_TABLE")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Subcommand named on the command line, if any.
///
/// Used when parsing failed and no [`Command`] value exists.
pub fn requested_command<S: AsRef<str>>(args: &[S]) -> Option<&'static str> {
    args.iter()
        .skip(1)
        .find_map(|arg| match arg.as_ref() {
            "encode" => Some("encode"),
            "map" => Some("map"),
            "convert" => Some("convert"),
            _ => None,
        })
}

/// Exit code for a parse failure or help request.
///
/// `encode` exits 1 whenever it only shows help; `map` shows help and
/// examples and exits 0 when called without arguments. Everything else
/// keeps clap's codes.
pub fn parse_exit_code(error: &clap::Error, command: Option<&str>) -> i32 {
    let help = matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    match command {
        Some("encode") if help => 1,
        Some("map") if help => 0,
        _ => error.exit_code(),
    }
}

/// Console output and exit code for a failed `map` run.
#[derive(Debug)]
pub struct MapFailure {
    /// Written to stderr.
    pub error_line: String,
    /// Usage help and examples, written to stdout.
    pub usage: String,
    pub exit_code: i32,
}

impl MapFailure {
    pub fn new(error: &dyn fmt::Display) -> Self {
        Self {
            error_line: format!("Error: {error}"),
            usage: format!("Usage instructions:\n{}", map_usage()),
            exit_code: 1,
        }
    }
}

/// Rendered help of the `map` subcommand, examples included.
pub fn map_usage() -> String {
    let mut command = Cli::command();
    command.build();
    command
        .find_subcommand_mut("map")
        .map(|map| map.render_help().to_string())
        .unwrap_or_else(|| MAP_EXAMPLES.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(args: &[&str]) -> clap::Error {
        match Cli::try_parse_from(args) {
            Ok(_) => panic!("expected a parse error for {args:?}"),
            Err(error) => error,
        }
    }

    #[test]
    fn encode_without_arguments_exits_one() {
        let args = ["opal-tools", "encode"];
        let error = parse_error(&args);
        assert_eq!(
            error.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
        assert_eq!(parse_exit_code(&error, requested_command(&args)), 1);
    }

    #[test]
    fn encode_help_exits_one() {
        let args = ["opal-tools", "encode", "in.parquet", "out.csv", "--help"];
        let error = parse_error(&args);
        assert_eq!(parse_exit_code(&error, requested_command(&args)), 1);
    }

    #[test]
    fn map_without_arguments_shows_examples_and_exits_zero() {
        let args = ["opal-tools", "map"];
        let error = parse_error(&args);
        assert!(error.to_string().contains("Basic conversion:"));
        assert_eq!(parse_exit_code(&error, requested_command(&args)), 0);
    }

    #[test]
    fn convert_missing_output_is_a_usage_error() {
        let args = ["opal-tools", "convert", "in.parquet"];
        let error = parse_error(&args);
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(parse_exit_code(&error, requested_command(&args)), 2);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "opal-tools",
            "map",
            "meta.json",
            "dict.xlsx",
            "demo",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Map(args) = cli.command else {
            panic!("expected map");
        };
        assert_eq!(args.table_name, "demo");
    }

    #[test]
    fn requested_command_skips_binary_name() {
        assert_eq!(requested_command(&["map"]), None);
        assert_eq!(requested_command(&["opal-tools", "-v", "encode"]), Some("encode"));
        assert_eq!(requested_command::<&str>(&[]), None);
    }

    #[test]
    fn map_failure_reports_error_with_usage() {
        let failure = MapFailure::new(&"JSON missing top-level 'entries' key");
        assert_eq!(failure.exit_code, 1);
        assert_eq!(
            failure.error_line,
            "Error: JSON missing top-level 'entries' key"
        );
        assert!(failure.usage.starts_with("Usage instructions:"));
        assert!(failure.usage.contains("<TABLE_NAME>"));
        assert!(failure.usage.contains("Basic conversion:"));
    }
}
