use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

mod common;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(cargo_bin!("quotebook"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_quotation_lifecycle_across_runs() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");

    // 1. Import a quotation and remember its id
    let import = run(
        &data_dir,
        &["import", "quotation", "tests/fixtures/quotation.json"],
    );
    assert!(import.status.success());
    let id = stdout(&import).trim().to_string();
    assert_eq!(id.len(), 10);

    // 2. A second run lists it from disk
    let list = run(&data_dir, &["list", "quotation"]);
    assert!(list.status.success());
    let listing = stdout(&list);
    assert!(listing.starts_with("id,code,for,date,total,updated_at\n"));
    assert!(listing.contains(&format!(
        "{id},QT-0009,Globex,2024-05-01,RM 200.00; USD 50.00,"
    )));

    // 3. Preview and export read the same record
    let show = stdout(&run(&data_dir, &["show", "quotation", &id]));
    assert!(show.contains("QUOTATION QT-0009"));
    assert!(show.contains("Deposit (30%) (RM)"));
    assert!(show.contains("Final Payment (70%) (USD)"));
    assert!(show.contains("USD 35.00"));

    let export = run(&data_dir, &["export", "quotation", &id]);
    let exported: serde_json::Value = serde_json::from_slice(&export.stdout).unwrap();
    assert_eq!(exported["id"], id.as_str());
    assert_eq!(exported["projectTitle"], "Website rebuild");
    assert!(exported["createdAt"].as_str().is_some_and(|s| !s.is_empty()));

    // 4. Duplicating bumps the document number and lists newest first
    let duplicate = run(&data_dir, &["duplicate", "quotation", &id]);
    assert!(duplicate.status.success());
    let copy_id = stdout(&duplicate).trim().to_string();
    assert_ne!(copy_id, id);

    let listing = stdout(&run(&data_dir, &["list", "quotation"]));
    let rows: Vec<&str> = listing.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with(&format!("{copy_id},QT-0010,")));
    assert!(rows[1].starts_with(&format!("{id},QT-0009,")));

    // 5. Deleting the original leaves the copy
    assert!(run(&data_dir, &["delete", "quotation", &id]).status.success());
    let listing = stdout(&run(&data_dir, &["list", "quotation"]));
    assert!(!listing.contains(&id));
    assert!(listing.contains(&copy_id));
}

#[test]
fn test_invoice_import_assigns_new_id() {
    let dir = tempdir().unwrap();

    let import = run(dir.path(), &["import", "invoice", "tests/fixtures/invoice.json"]);
    assert!(import.status.success());
    let id = stdout(&import).trim().to_string();
    assert_ne!(id, "replaced-on-import");

    let listing = stdout(&run(dir.path(), &["list", "invoice"]));
    assert!(listing.contains(&format!("{id},INV-0041,Initech,2024-06-15,RM 1174.50,")));

    let show = stdout(&run(dir.path(), &["show", "invoice", &id]));
    assert!(show.contains("INVOICE INV-0041"));
    assert!(show.contains("(RM 25.50)"));
    assert!(show.contains("RM One Thousand One Hundred Seventy Four Only"));
}

#[test]
fn test_collections_are_kept_apart() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q.json");
    common::generate_quotation(&file, "Q-7", "Kiosk", &[10.0, 20.0]).unwrap();

    assert!(
        run(dir.path(), &["import", "quotation", file.to_str().unwrap()])
            .status
            .success()
    );

    let invoices = stdout(&run(dir.path(), &["list", "invoice"]));
    assert_eq!(invoices, "id,code,for,date,total,updated_at\n");
    assert!(dir.path().join("quotations.json").exists());
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let import = Command::new(cargo_bin!("quotebook"))
        .arg("--db-path")
        .arg(&db_path)
        .args(["import", "quotation", "tests/fixtures/quotation.json"])
        .output()
        .expect("Failed to execute command");
    assert!(import.status.success());
    let id = stdout(&import).trim().to_string();

    let list = Command::new(cargo_bin!("quotebook"))
        .arg("--db-path")
        .arg(&db_path)
        .args(["list", "quotation"])
        .output()
        .expect("Failed to execute command");
    assert!(stdout(&list).contains(&id));
}
