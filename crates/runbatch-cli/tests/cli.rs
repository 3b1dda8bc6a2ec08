use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const CASES_CSV: &str = "\
switch,Description,Default Value,ref,carbon_cap,no_nuclear
solver,LP solver,cplex,,,
endyear,Final model year,2050,,,2040
carbon,Carbon policy,none,,cap80,
nuclear,Allow new nuclear,1,,,0
";

fn write_table(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Run from an isolated directory so no stray runbatch.toml is picked up.
fn runbatch(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("runbatch").unwrap();
    cmd.current_dir(cwd).env("HOME", cwd);
    cmd
}

#[test]
fn validate_reports_counts() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    runbatch(dir.path())
        .args(["validate", table.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 switch(es), 3 case(s)"));
}

#[test]
fn defaults_to_cases_csv_in_working_directory() {
    let dir = tempdir().unwrap();
    write_table(&dir, "cases.csv", CASES_CSV);
    runbatch(dir.path())
        .args(["commands"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--case=ref --solver=cplex --endyear=2050 --carbon=none --nuclear=1",
        ));
}

#[test]
fn commands_prints_one_line_per_case_in_header_order() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    let output = runbatch(dir.path())
        .args(["commands", table.to_str().unwrap(), "--program", "gams"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "gams --case=ref --solver=cplex --endyear=2050 --carbon=none --nuclear=1",
            "gams --case=carbon_cap --solver=cplex --endyear=2050 --carbon=cap80 --nuclear=1",
            "gams --case=no_nuclear --solver=cplex --endyear=2040 --carbon=none --nuclear=0",
        ]
    );
}

#[test]
fn commands_uses_tool_from_config_file() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    fs::write(
        dir.path().join("runbatch.toml"),
        "[tool]\nprogram = \"gams\"\nmodel = \"dyn_egt.gms\"\n",
    )
    .unwrap();
    runbatch(dir.path())
        .args(["commands", table.to_str().unwrap(), "--case", "no_nuclear"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "gams dyn_egt.gms --case=no_nuclear ",
        ));
}

#[test]
fn unknown_case_fails() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    runbatch(dir.path())
        .args(["show", "missing", table.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown case 'missing'"));
}

#[test]
fn missing_default_names_switch_and_case() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "broken.csv",
        "switch,Description,Default Value,caseA\nbeta,,,\n",
    );
    runbatch(dir.path())
        .args(["validate", table.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "switch 'beta' has no value for case 'caseA'",
        ));
}

#[test]
fn malformed_table_fails() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "bad.csv", "switch,caseA\nmode,fast\n");
    runbatch(dir.path())
        .args(["list", table.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed case table"));
}

#[test]
fn show_json_lists_resolved_switches() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    let output = runbatch(dir.path())
        .args(["show", "carbon_cap", table.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["case_name"], "carbon_cap");
    assert_eq!(value["switches"][2]["name"], "carbon");
    assert_eq!(value["switches"][2]["value"], "cap80");
}

#[test]
fn list_csv_output() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    runbatch(dir.path())
        .args(["list", table.to_str().unwrap(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "case,explicit,defaulted\nref,0,4\ncarbon_cap,1,3\nno_nuclear,2,2\n",
        ));
}

#[test]
fn semicolon_delimited_table() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "cases.txt",
        "switch;Description;Default Value;caseA\nmode;;fast;\n",
    );
    runbatch(dir.path())
        .args(["commands", table.to_str().unwrap(), "--delimiter", ";"])
        .assert()
        .success()
        .stdout(predicate::eq("--case=caseA --mode=fast\n"));
}

#[test]
fn expand_writes_manifest() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "cases.csv", CASES_CSV);
    let out = dir.path().join("out").join("cases.json");
    runbatch(dir.path())
        .args([
            "expand",
            table.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 resolved case(s)"));

    let manifest = runbatch_cases::load_case_manifest(&out).unwrap();
    assert_eq!(manifest.num_cases, 3);
    assert_eq!(
        manifest.cases[1].invocation.as_str(),
        "--case=carbon_cap --solver=cplex --endyear=2050 --carbon=cap80 --nuclear=1"
    );
}
