//! CLI argument definitions for tbridge.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tbridge_io::ClassIndex;

#[derive(Parser)]
#[command(
    name = "tbridge",
    version,
    about = "Convert tabular datasets between attribute-oriented and vector-oriented form",
    long_about = "Convert tabular datasets between attribute-oriented and vector-oriented form.\n\n\
                  Reads ARFF or CSV input, reorders columns as numeric, categorical, then\n\
                  target, codes categorical labels, and writes the vector dataset as text,\n\
                  CSV, or JSON."
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
    /// Show how a dataset's attributes map onto the vector layout.
    Inspect(InspectArgs),

    /// Convert a dataset to vector form.
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// ARFF or CSV file to read (chosen by extension).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Class attribute: none, first, last, a 1-based position, or a name.
    #[arg(long = "class", value_name = "CLASS", default_value = "none")]
    pub class: ClassIndex,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the first N instances as a table.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format for the vector dataset.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    /// Write output to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Convert the result back and verify every record survives unchanged.
    #[arg(long = "roundtrip")]
    pub roundtrip: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Csv,
    Json,
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
