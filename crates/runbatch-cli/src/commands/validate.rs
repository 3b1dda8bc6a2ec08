use anyhow::{Context, Result};
use runbatch_cases::resolve_all;
use runbatch_cli::cli::TableArgs;
use runbatch_cli::common::load_table;
use runbatch_cli::config::RunbatchConfig;

pub fn handle(args: &TableArgs, config: &RunbatchConfig) -> Result<()> {
    let (path, table) = load_table(args, config)?;
    let resolved = resolve_all(&table)
        .with_context(|| format!("resolving case table '{}'", path.display()))?;
    println!(
        "Case table {} validated: {} switch(es), {} case(s)",
        path.display(),
        table.switch_count(),
        resolved.len()
    );
    Ok(())
}
