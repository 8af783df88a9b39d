// End-to-end tests for the rostersync binary.
// Run with: cargo test -p rostersync-cli --test reconcile_cli

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn rostersync() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rostersync"))
}

const RKNET_CSV: &str = "\
Vorname,Nachname,E-Mail-Adresse,Personalnummer
Anna Maria,Müller,a.mueller@example.org,4711
Max,Mustermann,max@example.org,4712
Jan,Schmidt,j.schmidt@x.org,4713
";

const DINA_CSV: &str = "\
Benutzername,Voller Name,E-Mail,Gruppen
j.schmidt,Jan Schmidt,j.schmidt@x.org,user
";

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let rknet = dir.join("personal.csv");
    let dina = dir.join("accounts.csv");
    fs::write(&rknet, RKNET_CSV).unwrap();
    fs::write(&dina, DINA_CSV).unwrap();
    (rknet, dina)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn writes_unmatched_users_to_output() {
    let dir = tempdir().unwrap();
    let (rknet, dina) = write_fixtures(dir.path());
    let out = dir.path().join("neue-benutzer.csv");

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .args(["-o", out.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Benutzername,Voller Name,E-Mail,Gruppen\n\
         a.mueller,Anna Maria Müller,a.mueller@example.org,user\n\
         No Username,Max Mustermann,max@example.org,user\n"
    );
    assert!(stderr(&output).contains("wrote "));
}

#[test]
fn check_only_needs_no_output_path() {
    let dir = tempdir().unwrap();
    let (rknet, dina) = write_fixtures(dir.path());

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .arg("--check-only")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let report = stderr(&output);
    assert!(report.contains("matched: 1"), "report: {report}");
    assert!(report.contains("missing accounts: 2"), "report: {report}");
    assert!(
        report.contains("missing account: Anna Maria Müller (a.mueller@example.org) - suggested username: a.mueller"),
        "report: {report}"
    );
}

#[test]
fn missing_output_path_is_fatal() {
    let dir = tempdir().unwrap();
    let (rknet, dina) = write_fixtures(dir.path());

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("output file path is required"));
}

#[test]
fn unreadable_input_is_fatal() {
    let dir = tempdir().unwrap();
    let (_, dina) = write_fixtures(dir.path());

    let output = rostersync()
        .args(["-i", dir.path().join("missing.csv").to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .arg("--check-only")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: "));
}

#[test]
fn discrepancies_reported_but_not_fatal() {
    let dir = tempdir().unwrap();
    let rknet = dir.path().join("personal.csv");
    let dina = dir.path().join("accounts.csv");
    fs::write(
        &rknet,
        "Vorname,Nachname,E-Mail-Adresse\nJan,Schmidt,j.schmidt@x.org\n",
    )
    .unwrap();
    fs::write(
        &dina,
        "Voller Name,E-Mail\nJan Schmitt,j.schmidt@x.org\n",
    )
    .unwrap();

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .arg("--check-only")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report = stderr(&output);
    assert!(
        report.contains("Voller Name: DiNa-Wiki(Jan Schmitt) vs RKnet(Jan Schmidt)"),
        "report: {report}"
    );
    assert!(report.contains("discrepancies: 1"), "report: {report}");
}

#[test]
fn quiet_drops_per_record_lines() {
    let dir = tempdir().unwrap();
    let (rknet, dina) = write_fixtures(dir.path());

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .args(["--check-only", "--quiet"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report = stderr(&output);
    assert!(!report.contains("missing account: "), "report: {report}");
    assert!(report.contains("missing accounts: 2"), "report: {report}");
}

#[test]
fn json_output_carries_the_full_result() {
    let dir = tempdir().unwrap();
    let (rknet, dina) = write_fixtures(dir.path());

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .args(["--check-only", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["matched"], 1);
    assert_eq!(json["summary"]["unmatched"], 2);
    assert_eq!(json["unmatched"][0]["suggested_username"], "a.mueller");
    assert_eq!(json["unmatched"][1]["suggested_username"], serde_json::Value::Null);
    assert!(json["meta"]["engine_version"].is_string());
}

#[test]
fn semicolon_delimited_directory_export() {
    let dir = tempdir().unwrap();
    let rknet = dir.path().join("personal.csv");
    let dina = dir.path().join("accounts.csv");
    fs::write(
        &rknet,
        "Vorname,Nachname,E-Mail-Adresse\nJan,Schmidt,j.schmidt@x.org\n",
    )
    .unwrap();
    fs::write(
        &dina,
        "Benutzername;Voller Name;E-Mail\nj.schmidt;Jan Schmidt;j.schmidt@x.org\n",
    )
    .unwrap();

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .arg("--check-only")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report = stderr(&output);
    assert!(report.contains("matched: 1"), "report: {report}");
    assert!(report.contains("missing accounts: 0"), "report: {report}");
}

#[test]
fn duplicate_directory_email_warned() {
    let dir = tempdir().unwrap();
    let rknet = dir.path().join("personal.csv");
    let dina = dir.path().join("accounts.csv");
    fs::write(
        &rknet,
        "Vorname,Nachname,E-Mail-Adresse\nJan,Schmidt,j.schmidt@x.org\n",
    )
    .unwrap();
    fs::write(
        &dina,
        "Voller Name,E-Mail\nStale Name,j.schmidt@x.org\nJan Schmidt,j.schmidt@x.org\n",
    )
    .unwrap();

    let output = rostersync()
        .args(["-i", rknet.to_str().unwrap()])
        .args(["-d", dina.to_str().unwrap()])
        .arg("--check-only")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let report = stderr(&output);
    // Last occurrence matches, so the stale name is no discrepancy
    assert!(report.contains("duplicate directory email j.schmidt@x.org (2 occurrences"), "report: {report}");
    assert!(report.contains("discrepancies: 0"), "report: {report}");
}
