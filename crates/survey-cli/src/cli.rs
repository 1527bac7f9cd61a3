//! CLI argument definitions for the survey inspector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey",
    version,
    about = "Inspect survey questions and column labels",
    long_about = "Load a survey table from CSV, attach column labels from a JSON file\n\
                  and show how columns group into questions and how their labels\n\
                  split into shared and per-column text."
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

    /// Log output format.
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
    /// List questions with their columns and shared label text.
    Questions(SurveyArgs),

    /// List column labels, optionally for a single question.
    Labels(LabelsArgs),
}

#[derive(Args)]
pub struct SurveyArgs {
    /// Survey table with a single header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// JSON label file: an object of column to label, or a list of
    /// `{"column", "label"}` entries.
    #[arg(long = "labels", value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Separator between question stem and sub-question index.
    #[arg(long = "separator", value_name = "SEP", default_value = "_")]
    pub separator: String,

    /// Also strip label text shared at the end of every column's label.
    #[arg(long = "trim-common-suffix")]
    pub trim_common_suffix: bool,
}

#[derive(Args)]
pub struct LabelsArgs {
    #[command(flatten)]
    pub survey: SurveyArgs,

    /// Only show the columns of this question.
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,
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
