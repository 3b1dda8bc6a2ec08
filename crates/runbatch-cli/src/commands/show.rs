use std::io::{self, stdout, Write};

use anyhow::Result;
use runbatch_cases::{resolve_selected, CaseDefinition, CaseTable};
use runbatch_cli::cli::TableArgs;
use runbatch_cli::common::{load_table, write_csv, write_json, write_jsonl, OutputFormat};
use runbatch_cli::config::RunbatchConfig;
use serde::Serialize;
use tabwriter::TabWriter;

#[derive(Debug, Serialize)]
struct SwitchRow<'a> {
    switch: &'a str,
    value: &'a str,
    source: &'static str,
}

fn switch_rows<'a>(table: &CaseTable, definition: &'a CaseDefinition) -> Vec<SwitchRow<'a>> {
    definition
        .switches
        .iter()
        .map(|switch| {
            let explicit = table
                .value(&definition.case_name, &switch.name)
                .is_some_and(|raw| !raw.is_empty());
            SwitchRow {
                switch: &switch.name,
                value: &switch.value,
                source: if explicit { "case" } else { "default" },
            }
        })
        .collect()
}

pub fn handle(
    args: &TableArgs,
    config: &RunbatchConfig,
    case: &str,
    format: OutputFormat,
) -> Result<()> {
    let (_, table) = load_table(args, config)?;
    let resolved = resolve_selected(&table, &[case])?;
    let Some(resolved) = resolved.first() else {
        return Ok(());
    };
    let rows = switch_rows(&table, &resolved.definition);
    match format {
        OutputFormat::Table => {
            println!("Case {}", resolved.case_name());
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "SWITCH\tVALUE\tSOURCE")?;
            for row in &rows {
                writeln!(writer, "{}\t{}\t{}", row.switch, row.value, row.source)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => write_json(&resolved.definition, &mut stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&rows, &mut stdout())?,
        OutputFormat::Csv => write_csv(&rows, stdout())?,
    }
    Ok(())
}
