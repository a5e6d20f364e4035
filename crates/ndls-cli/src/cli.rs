//! CLI argument definitions for the standard validity checker.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ndls-check",
    version,
    about = "Check the validity of national standards on ndls.org.cn",
    long_about = "Check whether national standard numbers are active, superseded, or withdrawn\n\
                  on ndls.org.cn — directly, or for every row of a CSV table with a 标准号 column.",
    group(ArgGroup::new("mode").required(true).args(["standards", "file"]))
)]
pub struct Cli {
    /// Standard numbers to query directly (space separated).
    #[arg(short = 's', long = "standards", value_name = "NO", num_args = 1..)]
    pub standards: Vec<String>,

    /// CSV table whose 标准号 column drives a row-by-row update.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output path for the updated table (default: overwrite the input).
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        requires = "file",
        conflicts_with = "standards"
    )]
    pub output: Option<PathBuf>,

    /// Seconds to pause between successive service calls.
    #[arg(short = 'd', long = "delay", value_name = "SECONDS", default_value_t = 0.5)]
    pub delay: f64,

    /// Tolerated number of failed queries before the run exits nonzero.
    ///
    /// Without this flag a run exits nonzero only when every query failed.
    #[arg(long = "max-errors", value_name = "N")]
    pub max_errors: Option<usize>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    use clap::CommandFactory;
    use clap::Parser;

    use super::Cli;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn one_mode_is_required() {
        assert!(Cli::try_parse_from(["ndls-check"]).is_err());
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        assert!(
            Cli::try_parse_from(["ndls-check", "-s", "GB 2757-2012", "-f", "standards.csv"])
                .is_err()
        );
    }

    #[test]
    fn query_mode_accepts_multiple_numbers() {
        let cli =
            Cli::try_parse_from(["ndls-check", "-s", "GB 2757-2012", "GB/T 8170-2008"]).unwrap();
        assert_eq!(cli.standards.len(), 2);
        assert!(cli.file.is_none());
        assert!((cli.delay - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn output_requires_file_mode() {
        assert!(
            Cli::try_parse_from(["ndls-check", "-s", "GB 2757-2012", "-o", "out.csv"]).is_err()
        );
        let cli = Cli::try_parse_from([
            "ndls-check",
            "-f",
            "standards.csv",
            "-o",
            "out.csv",
            "-d",
            "1.5",
        ])
        .unwrap();
        assert_eq!(cli.output.as_deref().unwrap().to_str(), Some("out.csv"));
        assert!((cli.delay - 1.5).abs() < f64::EPSILON);
    }
}
