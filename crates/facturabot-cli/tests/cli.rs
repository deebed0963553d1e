//! End-to-end tests for the facturabot binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn replay_fixture() -> &'static str {
    r#"{
        "invoiceNumber": "0001-00012345",
        "date": "15/03/2025",
        "operationType": "Transferencia",
        "vendor": { "name": "Electro Hogar SA", "taxId": "30-71675728-1" },
        "totalAmount": 125000.0,
        "currency": "ARS",
        "receiverBank": "Positivo SRL",
        "items": [
            { "description": "Heladera", "quantity": 1, "unitPrice": 125000.0 }
        ],
        "taxes": { "iva": 21000.0, "otherTaxes": 0.0 },
        "paymentMethod": "Transferencia"
    }"#
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("facturabot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_requires_input_or_replay() {
    Command::cargo_bin("facturabot")
        .unwrap()
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--replay"));
}

#[test]
fn process_replay_writes_validated_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let reply = dir.path().join("reply.json");
    std::fs::write(&reply, replay_fixture()).unwrap();
    let output = dir.path().join("invoice.json");

    Command::cargo_bin("facturabot")
        .unwrap()
        .args(["process", "--replay"])
        .arg(&reply)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["invoiceNumber"], "0001-00012345");
    assert_eq!(value["date"], "2025-03-15");
    assert_eq!(value["metadata"]["confidence"], "high");
}

#[test]
fn process_replay_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let reply = dir.path().join("reply.json");
    std::fs::write(&reply, replay_fixture()).unwrap();

    Command::cargo_bin("facturabot")
        .unwrap()
        .args(["process", "--replay"])
        .arg(&reply)
        .args(["--format", "text", "--show-confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Electro Hogar SA"))
        .stdout(predicate::str::contains("CUIT: 30-71675728-1"))
        .stdout(predicate::str::contains("Extraction confidence: high"));
}

#[test]
fn export_collects_processed_invoices() {
    let dir = tempfile::tempdir().unwrap();
    let reply = dir.path().join("reply.json");
    std::fs::write(&reply, replay_fixture()).unwrap();
    let invoice_path = dir.path().join("invoice.json");

    Command::cargo_bin("facturabot")
        .unwrap()
        .args(["process", "--replay"])
        .arg(&reply)
        .arg("-o")
        .arg(&invoice_path)
        .assert()
        .success();

    let sheet_path = dir.path().join("sheet.csv");
    Command::cargo_bin("facturabot")
        .unwrap()
        .arg("export")
        .arg(format!("{}/*.json", dir.path().display()))
        .arg("-o")
        .arg(&sheet_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 invoices"));

    let sheet = std::fs::read_to_string(&sheet_path).unwrap();
    assert!(sheet.contains("Fecha"));
    assert!(sheet.contains("Electro Hogar SA"));
    assert!(sheet.contains("15/03/2025"));
}

#[test]
fn config_path_prints_location() {
    Command::cargo_bin("facturabot")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
