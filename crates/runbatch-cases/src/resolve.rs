//! Per-case switch mappings and invocation strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CaseError, CaseResult};
use crate::table::CaseTable;

/// One resolved switch of a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchValue {
    pub name: String,
    pub value: String,
}

/// A case name and its fully resolved switches, in table row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDefinition {
    pub case_name: String,
    pub switches: Vec<SwitchValue>,
}

impl CaseDefinition {
    pub fn get(&self, switch: &str) -> Option<&str> {
        self.switches
            .iter()
            .find(|s| s.name == switch)
            .map(|s| s.value.as_str())
    }

    pub fn switch_names(&self) -> impl Iterator<Item = &str> {
        self.switches.iter().map(|s| s.name.as_str())
    }

    /// Switches keyed by name, for consumers that do not care about order.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.switches
            .iter()
            .map(|s| (s.name.clone(), s.value.clone()))
            .collect()
    }

    /// The invocation as separate argument strings.
    ///
    /// Each element is one `--key=value` argument, so values containing
    /// spaces or shell metacharacters survive when handed directly to a
    /// process builder instead of a shell.
    pub fn to_args(&self) -> Vec<String> {
        std::iter::once(format!("--case={}", self.case_name))
            .chain(
                self.switches
                    .iter()
                    .map(|s| format!("--{}={}", s.name, s.value)),
            )
            .collect()
    }
}

/// Raw command-line fragment for one case:
/// `--case=<name> --<switch>=<value> ...`.
///
/// Values are concatenated verbatim. Nothing is quoted or escaped, so a
/// value with spaces or shell metacharacters will be split or interpreted
/// if the string is passed through a shell. Use [`CaseDefinition::to_args`]
/// when arguments must survive intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Invocation(String);

impl Invocation {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A case definition together with its invocation string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCase {
    pub definition: CaseDefinition,
    pub invocation: Invocation,
}

impl ResolvedCase {
    pub fn case_name(&self) -> &str {
        &self.definition.case_name
    }
}

/// Build the switch mapping of one case column.
///
/// Empty cells fall back to the row default while the table still carries
/// its `Default Value` column; a cell with neither is reported as
/// [`CaseError::MissingDefault`].
pub fn build_case_definition(table: &CaseTable, case_name: &str) -> CaseResult<CaseDefinition> {
    let case_idx = table
        .case_position(case_name)
        .ok_or_else(|| CaseError::UnknownCase {
            name: case_name.to_string(),
        })?;
    let mut switches = Vec::with_capacity(table.switch_count());
    for (row, name) in table.switches().iter().enumerate() {
        let value = table.resolved_cell(case_idx, row)?;
        switches.push(SwitchValue {
            name: name.clone(),
            value: value.to_string(),
        });
    }
    Ok(CaseDefinition {
        case_name: case_name.to_string(),
        switches,
    })
}

pub fn build_invocation(definition: &CaseDefinition) -> Invocation {
    let mut out = format!("--case={}", definition.case_name);
    for switch in &definition.switches {
        out.push_str(" --");
        out.push_str(&switch.name);
        out.push('=');
        out.push_str(&switch.value);
    }
    Invocation(out)
}

/// Resolve defaults once, then build every case in header order.
pub fn resolve_all(table: &CaseTable) -> CaseResult<Vec<ResolvedCase>> {
    let resolved = table.resolve_defaults()?;
    let mut cases = Vec::with_capacity(resolved.case_count());
    for name in resolved.case_names() {
        let definition = build_case_definition(&resolved, name)?;
        let invocation = build_invocation(&definition);
        debug!(case = %name, %invocation, "resolved case");
        cases.push(ResolvedCase {
            definition,
            invocation,
        });
    }
    Ok(cases)
}

/// Resolve only the named cases, in the order requested.
///
/// Cases outside the selection are not resolved, so a missing default in an
/// unrelated column does not block the requested ones.
pub fn resolve_selected<S: AsRef<str>>(
    table: &CaseTable,
    cases: &[S],
) -> CaseResult<Vec<ResolvedCase>> {
    resolve_all(&table.select(cases)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableOptions;

    fn parse(text: &str) -> CaseTable {
        CaseTable::from_reader(text.as_bytes(), &TableOptions::default()).unwrap()
    }

    #[test]
    fn builds_invocation_from_defaults_and_case_values() {
        let table = parse(
            "switch,Description,Default Value,caseA\n\
             alpha,,1,\n\
             beta,,,5\n",
        );
        let resolved = resolve_all(&table).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved[0].invocation.as_str(),
            "--case=caseA --alpha=1 --beta=5"
        );
        assert_eq!(resolved[0].definition.get("alpha"), Some("1"));
        assert_eq!(resolved[0].definition.get("beta"), Some("5"));
    }

    #[test]
    fn case_values_take_precedence_over_defaults() {
        let table = parse(
            "switch,Description,Default Value,caseA,caseB\n\
             mode,,fast,,slow\n",
        );
        let resolved = resolve_all(&table).unwrap();
        assert_eq!(resolved[0].case_name(), "caseA");
        assert_eq!(resolved[0].definition.get("mode"), Some("fast"));
        assert_eq!(resolved[1].case_name(), "caseB");
        assert_eq!(resolved[1].definition.get("mode"), Some("slow"));
    }

    #[test]
    fn unknown_case_is_rejected() {
        let table = parse("switch,Description,Default Value,caseA\nmode,,fast,\n");
        let err = build_case_definition(&table, "Default Value").unwrap_err();
        assert!(matches!(err, CaseError::UnknownCase { ref name } if name == "Default Value"));
    }

    #[test]
    fn build_on_unresolved_table_never_returns_partial_definition() {
        let table = parse(
            "switch,Description,Default Value,caseA\n\
             alpha,,1,\n\
             beta,,,\n",
        );
        let err = build_case_definition(&table, "caseA").unwrap_err();
        assert!(matches!(err, CaseError::MissingDefault { ref switch, .. } if switch == "beta"));
    }

    #[test]
    fn invocation_keeps_row_order_and_raw_values() {
        let definition = CaseDefinition {
            case_name: "run 1".into(),
            switches: vec![
                SwitchValue {
                    name: "zeta".into(),
                    value: "a b".into(),
                },
                SwitchValue {
                    name: "alpha".into(),
                    value: "$HOME".into(),
                },
            ],
        };
        let invocation = build_invocation(&definition);
        assert_eq!(invocation.to_string(), "--case=run 1 --zeta=a b --alpha=$HOME");
        assert_eq!(build_invocation(&definition.clone()), invocation);
        assert_eq!(
            definition.to_args(),
            vec!["--case=run 1", "--zeta=a b", "--alpha=$HOME"]
        );
    }

    #[test]
    fn selected_cases_ignore_unrelated_gaps() {
        let table = parse(
            "switch,Description,Default Value,good,broken\n\
             beta,,,5,\n",
        );
        assert!(resolve_all(&table).is_err());
        let resolved = resolve_selected(&table, &["good"]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].invocation.as_str(), "--case=good --beta=5");
    }
}
