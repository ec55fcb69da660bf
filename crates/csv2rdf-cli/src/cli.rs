//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csv2rdf",
    version,
    about = "Convert enhancement-request and incident-report CSV files to Turtle",
    long_about = "Convert enhancement-request and incident-report CSV files to one Turtle document.\n\n\
                  Customers and modules are deduplicated across all inputs. Files that cannot be\n\
                  read are reported and skipped; the run only fails when none can be read."
)]
pub struct Cli {
    /// Input CSV files or directories of CSV files.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output Turtle file.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "output.ttl")]
    pub output: PathBuf,

    /// Write the document to stdout instead of --output.
    #[arg(long = "stdout", conflicts_with = "output")]
    pub stdout: bool,

    /// Namespace URI for entities, classes and data predicates.
    #[arg(long = "namespace", value_name = "URI")]
    pub namespace: Option<String>,

    /// Prefix bound to the namespace in the output.
    #[arg(long = "prefix", value_name = "NAME")]
    pub prefix: Option<String>,

    /// Write diagnostics and counts as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Exit non-zero when any file, row or field was skipped.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (customer names, raw dates) in logs and diagnostics.
    #[arg(long = "log-data")]
    pub log_data: bool,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["csv2rdf", "data"]);
        assert_eq!(cli.output, PathBuf::from("output.ttl"));
        assert!(!cli.stdout);
        assert!(!cli.strict);
        assert!(cli.namespace.is_none());
    }

    #[test]
    fn stdout_conflicts_with_explicit_output() {
        assert!(Cli::try_parse_from(["csv2rdf", "a.csv", "--stdout", "-o", "x.ttl"]).is_err());
        assert!(Cli::try_parse_from(["csv2rdf", "a.csv", "--stdout"]).is_ok());
    }

    #[test]
    fn inputs_are_required() {
        assert!(Cli::try_parse_from(["csv2rdf"]).is_err());
    }
}
