//! CLI argument definitions for scoredeck.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "scoredeck",
    version,
    about = "Convert gamification API JSON exports to styled XLSX workbooks",
    long_about = "Convert gamification API JSON exports to styled XLSX workbooks.\n\n\
                  Resolves the record array across known response shapes, flattens\n\
                  nested payloads, normalizes locale numbers and dates, and writes a\n\
                  multi-sheet workbook with summary and statistics views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Convert one or more response files to workbooks.
    Convert(ConvertArgs),

    /// List the configured source profiles.
    Sources(SourcesArgs),

    /// Generate the browser console scraping script for a source.
    Script(ScriptArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Response files to convert, processed in the order given.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Source profile to use for every file (default: inferred from the
    /// `<source>_response*.json` file name).
    #[arg(long = "source", value_name = "NAME")]
    pub source: Option<String>,

    /// JSON bundle overriding or extending the built-in source profiles.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output directory (default: <input folder>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// JSON bundle overriding or extending the built-in source profiles.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ScriptArgs {
    /// Source profile to generate the script for.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// JSON bundle overriding or extending the built-in source profiles.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// CSV/TXT identifier list parameterizing the run (reward codes,
    /// business blocks).
    #[arg(long = "ids", value_name = "PATH")]
    pub ids: Option<PathBuf>,

    /// Endpoint the generated script pages through.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Write the script here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
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
