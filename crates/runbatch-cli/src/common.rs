//! Common CLI types and utilities shared across commands.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use runbatch_cases::{CaseTable, TableOptions};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::cli::TableArgs;
use crate::config::RunbatchConfig;

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON array (pipe-friendly, structured)
    Json,
    /// JSON Lines - one JSON object per line
    Jsonl,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    /// Returns true if this format is machine-readable (suitable for piping)
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json | Self::Jsonl | Self::Csv)
    }
}

/// Convert a delimiter character into the single byte the CSV reader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter '{delimiter}' must be a single ASCII character"))
}

/// Table path and parse options, with command-line flags winning over the config file.
pub fn table_source(args: &TableArgs, config: &RunbatchConfig) -> Result<(PathBuf, TableOptions)> {
    let path = args
        .table
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.table.path));
    let delimiter = delimiter_byte(args.delimiter.unwrap_or(config.table.delimiter))?;
    Ok((path, TableOptions { delimiter }))
}

pub fn load_table(args: &TableArgs, config: &RunbatchConfig) -> Result<(PathBuf, CaseTable)> {
    let (path, options) = table_source(args, config)?;
    info!("Loading case table from {}", path.display());
    let table = CaseTable::from_path(&path, &options)
        .with_context(|| format!("loading case table '{}'", path.display()))?;
    Ok((path, table))
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write data as JSON Lines (one JSON object per line) to the given writer.
pub fn write_jsonl<W: Write, T: Serialize>(data: &[T], writer: &mut W) -> io::Result<()> {
    for item in data {
        serde_json::to_writer(&mut *writer, item).map_err(io::Error::other)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write flat records as CSV with a header row taken from the field names.
pub fn write_csv<W: Write, T: Serialize>(data: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in data {
        csv_writer.serialize(item).context("writing CSV record")?;
    }
    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}
