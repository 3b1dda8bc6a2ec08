//! Case table resolution for batch model runs.
//!
//! A case table lists switches as rows and named cases as columns, with a
//! `Default Value` column supplying fallbacks. This crate loads such a
//! table, fills the gaps and turns each case into a structured switch
//! mapping plus a `--case=<name> --<switch>=<value> ...` invocation string.
//!
//! ```ignore
//! use std::path::Path;
//! use runbatch_cases::{resolve_all, CaseTable, TableOptions};
//!
//! let table = CaseTable::from_path(Path::new("cases.csv"), &TableOptions::default())?;
//! for case in resolve_all(&table)? {
//!     println!("{}", case.invocation);
//! }
//! ```

pub mod error;
pub mod manifest;
pub mod resolve;
pub mod table;

pub use error::{CaseError, CaseResult};
pub use manifest::{load_case_manifest, write_case_manifest, CaseManifest};
pub use resolve::{
    build_case_definition, build_invocation, resolve_all, resolve_selected, CaseDefinition,
    Invocation, ResolvedCase, SwitchValue,
};
pub use table::{CaseTable, TableOptions, DEFAULT_VALUE_COLUMN, DESCRIPTION_COLUMN};
