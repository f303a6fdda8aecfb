//! CLI argument definitions for the seed generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "redi-seed",
    version,
    about = "REdI seed data generator - reconcile source extracts into a seed SQL script",
    long_about = "Reconcile the staff, training and facility extracts into one \
                  de-duplicated dataset and write it as an idempotent SQL seed script.\n\n\
                  Missing extracts are skipped with a warning; the rest still load."
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

    /// Prefix each log line with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile the extracts in a folder and write the seed output.
    Generate(GenerateArgs),

    /// List the declared sources, their files and merge rules.
    Sources(SourcesArgs),

    /// Print the salted hash of one or more identifiers.
    HashId(HashIdArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Folder containing the source extracts.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output file.
    #[arg(long = "output", short = 'o', value_name = "FILE", default_value = "seed_data.sql")]
    pub output: PathBuf,

    /// TOML configuration file (defaults apply when omitted).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "sql")]
    pub format: OutputFormatArg,

    /// Reconcile and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Leave out the post-load row count block.
    #[arg(long = "no-verify-block")]
    pub no_verify_block: bool,
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// TOML configuration file (defaults apply when omitted).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HashIdArgs {
    /// Identifiers to hash.
    #[arg(value_name = "IDENTIFIER", required = true)]
    pub identifiers: Vec<String>,

    /// TOML configuration file supplying the salt.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Sql,
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
