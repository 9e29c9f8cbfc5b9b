#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");
    let registry = common::write_registry();

    // 1. First run: place an order
    let script1 = common::write_lines(&[
        "createOrder,K1,O1,GeneralHospital,PfizerCo,DRUG-117,100,13.40,Ordered",
    ]);

    let output1 = Command::new(cargo_bin!("rxledger"))
        .arg(script1.path())
        .arg("--registry")
        .arg(registry.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("\"status\":\"success\""));

    // 2. Second run: the order is still there and can move on
    let script2 = common::write_lines(&[
        "advanceOrder,K1,PfizerCo,Shipped",
        "createOrder,K1,O1,GeneralHospital,PfizerCo,DRUG-117,100,13.40,Ordered",
        "queryOrder,K1",
    ]);

    let output2 = Command::new(cargo_bin!("rxledger"))
        .arg(script2.path())
        .arg("--registry")
        .arg(registry.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    assert!(stdout2.contains("\"kind\":\"DuplicateOrder\""));
    assert!(stdout2.contains("\"status\":\"Shipped\""));
}
