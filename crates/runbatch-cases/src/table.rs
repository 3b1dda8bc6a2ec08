//! Case table loading and default filling.
//!
//! A case table is a delimited file laid out as
//!
//! ```text
//! switch,Description,Default Value,baseline,high_demand
//! solver,LP solver,cplex,,
//! years,Horizon,2030,,2050
//! ```
//!
//! The first column names the switches (one per row). `Description` and
//! `Default Value` are bookkeeping columns located by name; every other
//! column is a case, kept in file order. Cell values are opaque strings.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace, warn};

use crate::error::{CaseError, CaseResult};

/// Header of the free-text column ignored by resolution.
pub const DESCRIPTION_COLUMN: &str = "Description";
/// Header of the column holding each switch's fallback value.
pub const DEFAULT_VALUE_COLUMN: &str = "Default Value";

/// Options controlling how a case table source is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Switches × cases, plus the optional reserved columns.
///
/// A freshly loaded table carries its `Description` and `Default Value`
/// columns. [`CaseTable::resolve_defaults`] returns a table without them in
/// which every case cell is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    index_name: String,
    switches: Vec<String>,
    descriptions: Option<Vec<String>>,
    defaults: Option<Vec<String>>,
    case_names: Vec<String>,
    /// `columns[case][row]`
    columns: Vec<Vec<String>>,
}

impl CaseTable {
    /// Load a case table from a file on disk.
    pub fn from_path(path: &Path, options: &TableOptions) -> CaseResult<Self> {
        let file = File::open(path).map_err(|source| CaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, options)?;
        debug!(
            path = %path.display(),
            switches = table.switch_count(),
            cases = table.case_count(),
            "loaded case table"
        );
        Ok(table)
    }

    /// Load a case table from any delimited text source.
    pub fn from_reader<R: Read>(reader: R, options: &TableOptions) -> CaseResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut builder = TableBuilder::from_headers(&headers)?;
        for result in rdr.records() {
            builder.push_row(&result?)?;
        }
        Ok(builder.finish())
    }

    /// Header of the switch index column.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Switch names in row order.
    pub fn switches(&self) -> &[String] {
        &self.switches
    }

    /// Case column headers in file order, excluding the reserved columns.
    pub fn case_names(&self) -> &[String] {
        &self.case_names
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn case_count(&self) -> usize {
        self.case_names.len()
    }

    /// True while the `Description`/`Default Value` columns are still attached.
    pub fn has_reserved_columns(&self) -> bool {
        self.defaults.is_some()
    }

    /// Cells of one case column, in row order.
    pub fn column(&self, case: &str) -> Option<&[String]> {
        self.case_position(case)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Raw cell for `case` × `switch`. Empty cells are returned as `""`.
    pub fn value(&self, case: &str, switch: &str) -> Option<&str> {
        let row = self.switch_position(switch)?;
        self.column(case).map(|cells| cells[row].as_str())
    }

    /// `Default Value` for a switch, if the column is attached and the cell is non-empty.
    pub fn default_value(&self, switch: &str) -> Option<&str> {
        let row = self.switch_position(switch)?;
        self.default_at(row)
    }

    pub fn description(&self, switch: &str) -> Option<&str> {
        let row = self.switch_position(switch)?;
        self.descriptions
            .as_ref()
            .map(|d| d[row].as_str())
            .filter(|d| !d.is_empty())
    }

    /// Fill every empty case cell from its row's `Default Value`.
    ///
    /// Case-supplied values always win. The returned table drops the
    /// reserved columns. Calling this on an already resolved table yields an
    /// equal table.
    pub fn resolve_defaults(&self) -> CaseResult<CaseTable> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for (case_idx, case) in self.case_names.iter().enumerate() {
            let mut filled = Vec::with_capacity(self.switches.len());
            let mut defaulted = 0usize;
            for row in 0..self.switches.len() {
                let value = self.resolved_cell(case_idx, row)?;
                if self.columns[case_idx][row].is_empty() {
                    trace!(case = %case, switch = %self.switches[row], value, "filled from default");
                    defaulted += 1;
                }
                filled.push(value.to_string());
            }
            if defaulted > 0 && defaulted == self.switches.len() {
                warn!(case = %case, "case supplies no switch values; all switches use defaults");
            }
            columns.push(filled);
        }
        debug!(
            cases = self.case_names.len(),
            switches = self.switches.len(),
            "resolved case table defaults"
        );
        Ok(CaseTable {
            index_name: self.index_name.clone(),
            switches: self.switches.clone(),
            descriptions: None,
            defaults: None,
            case_names: self.case_names.clone(),
            columns,
        })
    }

    /// Restrict the table to the named cases, in the order given.
    ///
    /// Reserved columns are kept so the result can still be resolved.
    pub fn select<S: AsRef<str>>(&self, cases: &[S]) -> CaseResult<CaseTable> {
        let mut case_names = Vec::with_capacity(cases.len());
        let mut columns = Vec::with_capacity(cases.len());
        for name in cases {
            let name = name.as_ref();
            let idx = self
                .case_position(name)
                .ok_or_else(|| CaseError::UnknownCase {
                    name: name.to_string(),
                })?;
            if case_names.iter().any(|c| c == name) {
                continue;
            }
            case_names.push(self.case_names[idx].clone());
            columns.push(self.columns[idx].clone());
        }
        Ok(CaseTable {
            index_name: self.index_name.clone(),
            switches: self.switches.clone(),
            descriptions: self.descriptions.clone(),
            defaults: self.defaults.clone(),
            case_names,
            columns,
        })
    }

    /// Case cell value, falling back to the default when the cell is empty.
    pub(crate) fn resolved_cell(&self, case_idx: usize, row: usize) -> CaseResult<&str> {
        let cell = self.columns[case_idx][row].as_str();
        if !cell.is_empty() {
            return Ok(cell);
        }
        self.default_at(row)
            .ok_or_else(|| CaseError::MissingDefault {
                switch: self.switches[row].clone(),
                case: self.case_names[case_idx].clone(),
            })
    }

    pub(crate) fn case_position(&self, case: &str) -> Option<usize> {
        self.case_names.iter().position(|c| c == case)
    }

    fn switch_position(&self, switch: &str) -> Option<usize> {
        self.switches.iter().position(|s| s == switch)
    }

    fn default_at(&self, row: usize) -> Option<&str> {
        self.defaults
            .as_ref()
            .map(|d| d[row].as_str())
            .filter(|d| !d.is_empty())
    }
}

/// Accumulates rows once the header has been validated.
struct TableBuilder {
    index_name: String,
    width: usize,
    description_col: usize,
    default_col: usize,
    case_cols: Vec<usize>,
    case_names: Vec<String>,
    switches: Vec<String>,
    seen_switches: HashSet<String>,
    descriptions: Vec<String>,
    defaults: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl TableBuilder {
    fn from_headers(headers: &StringRecord) -> CaseResult<Self> {
        let names: Vec<&str> = headers.iter().collect();
        let Some((index_name, rest)) = names.split_first() else {
            return Err(CaseError::malformed("missing header row"));
        };
        if rest.len() < 2 {
            return Err(CaseError::malformed(format!(
                "expected '{DESCRIPTION_COLUMN}' and '{DEFAULT_VALUE_COLUMN}' after the switch column, found {} column(s)",
                rest.len()
            )));
        }

        let mut seen = HashSet::new();
        for name in rest {
            if !seen.insert(*name) {
                return Err(CaseError::malformed(format!("duplicate column '{name}'")));
            }
        }

        // Positions are absolute record offsets (index column is 0).
        let find = |wanted: &str| {
            rest.iter()
                .position(|c| *c == wanted)
                .map(|p| p + 1)
                .ok_or_else(|| CaseError::malformed(format!("missing required column '{wanted}'")))
        };
        let description_col = find(DESCRIPTION_COLUMN)?;
        let default_col = find(DEFAULT_VALUE_COLUMN)?;

        let mut case_cols = Vec::new();
        let mut case_names = Vec::new();
        for (pos, name) in names.iter().enumerate().skip(1) {
            if pos == description_col || pos == default_col {
                continue;
            }
            if name.is_empty() {
                return Err(CaseError::malformed(format!(
                    "case column {} has an empty header",
                    pos + 1
                )));
            }
            case_cols.push(pos);
            case_names.push(name.to_string());
        }

        Ok(Self {
            index_name: index_name.to_string(),
            width: names.len(),
            description_col,
            default_col,
            columns: vec![Vec::new(); case_cols.len()],
            case_cols,
            case_names,
            switches: Vec::new(),
            seen_switches: HashSet::new(),
            descriptions: Vec::new(),
            defaults: Vec::new(),
        })
    }

    fn push_row(&mut self, record: &StringRecord) -> CaseResult<()> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() > self.width {
            return Err(CaseError::malformed(format!(
                "line {line} has {} fields but the header has {}",
                record.len(),
                self.width
            )));
        }
        let switch = record.get(0).unwrap_or_default().trim();
        if switch.is_empty() {
            return Err(CaseError::malformed(format!("line {line} has an empty switch name")));
        }
        if !self.seen_switches.insert(switch.to_string()) {
            return Err(CaseError::malformed(format!(
                "duplicate switch '{switch}' on line {line}"
            )));
        }

        let cell = |pos: usize| record.get(pos).unwrap_or_default().to_string();
        self.switches.push(switch.to_string());
        self.descriptions.push(cell(self.description_col));
        self.defaults.push(cell(self.default_col));
        for (column, pos) in self.columns.iter_mut().zip(&self.case_cols) {
            column.push(cell(*pos));
        }
        Ok(())
    }

    fn finish(self) -> CaseTable {
        CaseTable {
            index_name: self.index_name,
            switches: self.switches,
            descriptions: Some(self.descriptions),
            defaults: Some(self.defaults),
            case_names: self.case_names,
            columns: self.columns,
        }
    }
}
