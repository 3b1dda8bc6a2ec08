//! Error types for case table loading and resolution.
//!
//! Every failure is detected eagerly while loading the table, filling
//! defaults or building a single case, and is surfaced to the caller as a
//! [`CaseError`]. There is no recovery path inside this crate: the caller
//! decides whether to abort the batch or skip the offending case.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or resolving a case table.
#[derive(Error, Debug)]
pub enum CaseError {
    /// The table is not shaped as `<index>, Description, Default Value, <cases>...`.
    #[error("malformed case table: {reason}")]
    MalformedTable { reason: String },

    /// A case left a switch empty and the switch declares no default.
    #[error("switch '{switch}' has no value for case '{case}' and no default value")]
    MissingDefault { switch: String, case: String },

    /// The requested case is not a column of the table.
    #[error("unknown case '{name}'")]
    UnknownCase { name: String },

    /// The table source could not be opened.
    #[error("failed to read case table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited text itself could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CaseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CaseError::MalformedTable {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results using CaseError.
pub type CaseResult<T> = Result<T, CaseError>;
