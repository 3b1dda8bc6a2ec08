use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (overrides `[logging] level` in the config file)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Path to a runbatch.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the case table from.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Case table file (defaults to `[table] path` from the config, then cases.csv)
    pub table: Option<PathBuf>,

    /// Field delimiter of the case table
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the case table and check that every case resolves
    Validate {
        #[command(flatten)]
        table: TableArgs,
    },
    /// List the cases defined in the table
    List {
        #[command(flatten)]
        table: TableArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the resolved switches of a single case
    Show {
        /// Case (column) name
        case: String,
        #[command(flatten)]
        table: TableArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the command line of each case
    Commands {
        #[command(flatten)]
        table: TableArgs,
        /// Only emit these cases (repeatable), in the order given
        #[arg(long = "case")]
        cases: Vec<String>,
        /// Program to prefix each command line with (overrides `[tool] program`)
        #[arg(long)]
        program: Option<String>,
        /// Model file passed before the switches (overrides `[tool] model`)
        #[arg(long)]
        model: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write every resolved case to a JSON manifest
    Expand {
        #[command(flatten)]
        table: TableArgs,
        /// Only expand these cases (repeatable), in the order given
        #[arg(long = "case")]
        cases: Vec<String>,
        /// Manifest output path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
