//! CLI argument definitions for the report design generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rptdesign",
    version,
    about = "Generate report design documents from spreadsheet analysis jobs",
    long_about = "Generate report design (.rptdesign) documents.\n\n\
                  Each job file pairs a spreadsheet analysis with a generated\n\
                  configuration (SQL query, parameters, title)."
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
    /// Generate one report design per job file.
    Generate(GenerateArgs),

    /// Validate existing report design files.
    Validate(ValidateArgs),

    /// List report types and their skeleton templates.
    Templates(TemplatesArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Job files (JSON with `analysis` and `config`).
    #[arg(value_name = "JOB", required = true)]
    pub jobs: Vec<PathBuf>,

    /// Output directory for generated files (default: output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skeleton template directory (default: $RPT_TEMPLATE_DIR or templates/birt, then built-in copies).
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Use the legacy generator profile.
    ///
    /// Scripts and HTML are written as escaped text instead of CDATA, SQL
    /// literals are requoted aggressively and both sanitization passes run.
    #[arg(long = "legacy")]
    pub legacy: bool,

    /// Validate each written file.
    #[arg(long = "validate")]
    pub validate: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Design files to validate.
    #[arg(value_name = "FILE", conflicts_with = "all")]
    pub files: Vec<PathBuf>,

    /// Validate every .rptdesign file in --dir.
    #[arg(long = "all")]
    pub all: bool,

    /// Directory scanned by --all.
    #[arg(long = "dir", value_name = "DIR", default_value = "output")]
    pub dir: PathBuf,
}

#[derive(Parser)]
pub struct TemplatesArgs {
    /// Skeleton template directory (default: $RPT_TEMPLATE_DIR or templates/birt, then built-in copies).
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
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
