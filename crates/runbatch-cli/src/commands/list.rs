use std::io::{self, stdout, Write};

use anyhow::Result;
use runbatch_cases::CaseTable;
use runbatch_cli::cli::TableArgs;
use runbatch_cli::common::{load_table, write_csv, write_json, write_jsonl, OutputFormat};
use runbatch_cli::config::RunbatchConfig;
use serde::Serialize;
use tabwriter::TabWriter;

#[derive(Debug, Serialize)]
struct CaseSummary {
    case: String,
    explicit: usize,
    defaulted: usize,
}

fn summarize(table: &CaseTable) -> Vec<CaseSummary> {
    table
        .case_names()
        .iter()
        .map(|case| {
            let cells = table.column(case).unwrap_or_default();
            let defaulted = cells.iter().filter(|c| c.is_empty()).count();
            CaseSummary {
                case: case.clone(),
                explicit: cells.len() - defaulted,
                defaulted,
            }
        })
        .collect()
}

pub fn handle(args: &TableArgs, config: &RunbatchConfig, format: OutputFormat) -> Result<()> {
    let (_, table) = load_table(args, config)?;
    let summaries = summarize(&table);
    match format {
        OutputFormat::Table => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "CASE\tEXPLICIT\tDEFAULTED")?;
            for summary in &summaries {
                writeln!(
                    writer,
                    "{}\t{}\t{}",
                    summary.case, summary.explicit, summary.defaulted
                )?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => write_json(&summaries, &mut stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&summaries, &mut stdout())?,
        OutputFormat::Csv => write_csv(&summaries, stdout())?,
    }
    if !format.is_machine_readable() {
        println!(
            "{} case(s) over {} switch(es)",
            summaries.len(),
            table.switch_count()
        );
    }
    Ok(())
}
