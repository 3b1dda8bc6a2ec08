use std::io::stdout;

use anyhow::{Context, Result};
use runbatch_cases::{resolve_all, resolve_selected, ResolvedCase};
use runbatch_cli::cli::TableArgs;
use runbatch_cli::common::{load_table, write_csv, write_json, write_jsonl, OutputFormat};
use runbatch_cli::config::RunbatchConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CommandLine {
    case: String,
    command: String,
}

#[derive(Debug, Serialize)]
struct CommandArgs {
    case: String,
    command: String,
    args: Vec<String>,
}

/// `[program] [model] --case=<name> --<switch>=<value> ...`
fn command_line(prefix: &[&str], case: &ResolvedCase) -> String {
    prefix
        .iter()
        .copied()
        .chain(std::iter::once(case.invocation.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn command_args(prefix: &[&str], case: &ResolvedCase) -> Vec<String> {
    prefix
        .iter()
        .map(|p| p.to_string())
        .chain(case.definition.to_args())
        .collect()
}

pub fn handle(
    args: &TableArgs,
    config: &RunbatchConfig,
    cases: &[String],
    program: Option<&str>,
    model: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let (path, table) = load_table(args, config)?;
    let resolved = if cases.is_empty() {
        resolve_all(&table)
    } else {
        resolve_selected(&table, cases)
    }
    .with_context(|| format!("resolving case table '{}'", path.display()))?;

    let prefix: Vec<&str> = program
        .or(config.tool.program.as_deref())
        .into_iter()
        .chain(model.or(config.tool.model.as_deref()))
        .collect();

    match format {
        OutputFormat::Table => {
            for case in &resolved {
                println!("{}", command_line(&prefix, case));
            }
        }
        OutputFormat::Json | OutputFormat::Jsonl => {
            let records: Vec<CommandArgs> = resolved
                .iter()
                .map(|case| CommandArgs {
                    case: case.case_name().to_string(),
                    command: command_line(&prefix, case),
                    args: command_args(&prefix, case),
                })
                .collect();
            if format == OutputFormat::Json {
                write_json(&records, &mut stdout(), true)?;
            } else {
                write_jsonl(&records, &mut stdout())?;
            }
        }
        OutputFormat::Csv => {
            let records: Vec<CommandLine> = resolved
                .iter()
                .map(|case| CommandLine {
                    case: case.case_name().to_string(),
                    command: command_line(&prefix, case),
                })
                .collect();
            write_csv(&records, stdout())?;
        }
    }
    Ok(())
}
