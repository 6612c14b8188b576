use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn daftar(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daftar").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1");
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_message_json() {
    let home = tempfile::tempdir().unwrap();
    let v = json_output(daftar(home.path()).args([
        "--json",
        "message",
        "25/01/2025, 14:30 - Rahul: Bhai party kab hai? \u{1f602}",
    ]));
    assert_eq!(v["sender"], "Rahul");
    assert_eq!(v["wordCount"], 5);
    assert_eq!(v["sentiment"], "funny");
}

#[test]
fn test_message_rejects_bad_line() {
    let home = tempfile::tempdir().unwrap();
    daftar(home.path())
        .args(["message", "no delimiters here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chat line"));
}

#[test]
fn test_report_table() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "student.json",
        r#"{"name": "Rahul", "marks": {"maths": 85, "science": 92, "english": 78}}"#,
    );
    daftar(home.path())
        .arg("report")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report Card: Rahul"))
        .stdout(predicate::str::contains("Percentage: 85%"))
        .stdout(predicate::str::contains("Grade: A "));
}

#[test]
fn test_report_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    let v = json_output(
        daftar(home.path())
            .args(["--json", "report", "-"])
            .write_stdin(r#"{"name": "Priya", "marks": {"maths": 35, "science": 28}}"#),
    );
    assert_eq!(v["percentage"], serde_json::json!(31.5));
    assert_eq!(v["grade"], "F");
}

#[test]
fn test_transactions_json() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "txns.json",
        r#"[
            {"id": "T1", "type": "credit", "amount": 5000, "to": "Salary", "category": "income", "date": "2025-01-01"},
            {"id": "T2", "type": "debit", "amount": 200, "to": "Swiggy", "category": "food", "date": "2025-01-02"},
            {"id": "T3", "type": "debit", "amount": 100, "to": "Swiggy", "category": "food", "date": "2025-01-03"}
        ]"#,
    );
    let v = json_output(daftar(home.path()).arg("--json").arg("transactions").arg(&file));
    assert_eq!(v["totalCredit"], 5000);
    assert_eq!(v["totalDebit"], 300);
    assert_eq!(v["netBalance"], 4700);
    assert_eq!(v["hasLargeTransaction"], true);
}

#[test]
fn test_transactions_csv_table() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "txns.csv",
        "id,type,amount,to,category,date\n\
         T1,credit,150000,Salary,income,2025-01-01\n\
         T2,debit,200,Swiggy,food,2025-01-02\n",
    );
    daftar(home.path())
        .args(["transactions", "--csv"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{20b9}1,50,000.00"))
        .stdout(predicate::str::contains("UPI Summary (2 transactions)"));
}

#[test]
fn test_transactions_all_invalid() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(home.path(), "txns.json", r#"[{"type": "refund", "amount": 10}]"#);
    daftar(home.path())
        .arg("transactions")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction log"));
}

#[test]
fn test_form_reports_every_error() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "form.json",
        r#"{"name": "", "email": "bad-email", "phone": "12345", "age": 10,
            "pincode": "0123", "state": null, "agreeTerms": false}"#,
    );
    daftar(home.path())
        .arg("form")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid Indian pincode"))
        .stdout(predicate::str::contains("State is required"))
        .stderr(predicate::str::contains("7 invalid field(s)"));
}

#[test]
fn test_form_valid() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "form.json",
        r#"{"name": "Rahul Sharma", "email": "rahul@gmail.com", "phone": "9876543210",
            "age": "20", "pincode": "400001", "state": "Maharashtra", "agreeTerms": true}"#,
    );
    daftar(home.path())
        .arg("form")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Form is valid"));
}

#[test]
fn test_pnr_table() {
    let home = tempfile::tempdir().unwrap();
    let file = write_file(
        home.path(),
        "pnr.json",
        r#"{
            "pnr": "1234567890",
            "train": {"number": "12301", "name": "Rajdhani Express", "from": "NDLS", "to": "HWH"},
            "classBooked": "3A",
            "passengers": [
                {"name": "Rahul Kumar", "age": 28, "gender": "M", "booking": "B1", "current": "B1"},
                {"name": "Amit Singh", "age": 60, "gender": "M", "booking": "WL12", "current": "WL8"}
            ]
        }"#,
    );
    daftar(home.path())
        .arg("pnr")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("PNR 123-456-7890"))
        .stdout(predicate::str::contains("NDLS \u{2192} HWH"))
        .stdout(predicate::str::contains("WAITING"))
        .stdout(predicate::str::contains("Chart not prepared"));
}

#[test]
fn test_missing_file_errors() {
    let home = tempfile::tempdir().unwrap();
    daftar(home.path())
        .args(["pnr", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_config_json_default() {
    let home = tempfile::tempdir().unwrap();
    daftar(home.path())
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:    json"));
    assert!(home.path().join(".config/daftar/settings.json").exists());

    let output = daftar(home.path())
        .args(["message", "01/12/2024, 09:15 - Priya: I love this song"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["sentiment"], "love");
}
