use std::path::Path;

use anyhow::{Context, Result};
use runbatch_cases::{resolve_all, resolve_selected, write_case_manifest, CaseManifest};
use runbatch_cli::cli::TableArgs;
use runbatch_cli::common::load_table;
use runbatch_cli::config::RunbatchConfig;
use tracing::info;

pub fn handle(args: &TableArgs, config: &RunbatchConfig, cases: &[String], out: &Path) -> Result<()> {
    let (path, table) = load_table(args, config)?;
    let resolved = if cases.is_empty() {
        resolve_all(&table)
    } else {
        resolve_selected(&table, cases)
    }
    .with_context(|| format!("resolving case table '{}'", path.display()))?;

    let manifest = CaseManifest::new(path.display().to_string(), resolved);
    write_case_manifest(out, &manifest)?;
    info!(cases = manifest.num_cases, "wrote case manifest");
    println!(
        "Wrote {} resolved case(s) to {}",
        manifest.num_cases,
        out.display()
    );
    Ok(())
}
