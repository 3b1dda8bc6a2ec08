use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

use crate::resolve::ResolvedCase;

/// Snapshot of every resolved case of a table, for the execution side to consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseManifest {
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub num_cases: usize,
    pub cases: Vec<ResolvedCase>,
}

impl CaseManifest {
    pub fn new(source: impl Into<String>, cases: Vec<ResolvedCase>) -> Self {
        Self {
            created_at: Utc::now(),
            source: source.into(),
            num_cases: cases.len(),
            cases,
        }
    }
}

pub fn write_case_manifest(path: &Path, manifest: &CaseManifest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(manifest).context("serializing case manifest to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("writing case manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_case_manifest(path: &Path) -> Result<CaseManifest> {
    let file =
        File::open(path).with_context(|| format!("opening case manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing case manifest '{}'", path.display()))
}
