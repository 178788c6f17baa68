//! CLI argument definitions for the cruise converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use cruise_dsg::Version;

#[derive(Parser)]
#[command(
    name = "cruise",
    version,
    about = "Convert cruise CSV data to CF trajectory NetCDF files",
    long_about = "Convert tabular oceanographic cruise data to CF trajectory files.\n\n\
                  Columns are mapped to standard fields through a TOML declaration,\n\
                  sample times are derived from whatever date and time columns exist,\n\
                  and the result is written as a NetCDF classic file."
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
    /// Convert a CSV file to a trajectory file.
    Convert(ConvertArgs),

    /// Show the metadata and columns of a trajectory file.
    Inspect(InspectArgs),

    /// List the standard data and metadata fields.
    Fields,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file with one sample per row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// TOML declaration mapping columns to fields.
    #[arg(long = "config", short = 'c', value_name = "TOML")]
    pub config: PathBuf,

    /// Output file (default: <CSV> with a .nc extension).
    #[arg(long = "output", short = 'o', value_name = "NC")]
    pub output: Option<PathBuf>,

    /// On-disk NetCDF variant.
    #[arg(long = "format", value_enum, default_value = "classic")]
    pub format: FormatArg,

    /// Keep bounding box and time coverage metadata as declared.
    #[arg(long = "no-coverage")]
    pub no_coverage: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Trajectory file to read.
    #[arg(value_name = "NC")]
    pub path: PathBuf,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Classic,
    Offset64,
}

impl From<FormatArg> for Version {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Classic => Self::Classic,
            FormatArg::Offset64 => Self::Offset64Bit,
        }
    }
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
