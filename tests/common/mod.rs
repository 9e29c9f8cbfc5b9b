#![allow(dead_code)]

use rxledger::application::contract::OrderContract;
use rxledger::infrastructure::in_memory::{InMemoryLedger, InMemoryRegistry};
use std::io::Write;
use tempfile::NamedTempFile;

pub const HOSPITAL: &str = "GeneralHospital";
pub const DISTRIBUTOR: &str = "PfizerCo";

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A contract over `ledger` with one registered hospital and one distributor.
pub fn contract_on(ledger: InMemoryLedger) -> OrderContract {
    OrderContract::new(
        Box::new(ledger),
        Box::new(InMemoryRegistry::from_iter([HOSPITAL, "Mercy Clinic"])),
        Box::new(InMemoryRegistry::from_iter([DISTRIBUTOR, "McKesson"])),
    )
}

pub fn contract() -> OrderContract {
    contract_on(InMemoryLedger::new())
}

pub fn create_args(key: &str, order_id: &str) -> Vec<String> {
    args(&[
        key,
        order_id,
        HOSPITAL,
        DISTRIBUTOR,
        "DRUG-117",
        "100",
        "13.40",
        "Ordered",
    ])
}

pub fn write_lines(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

pub fn write_registry() -> NamedTempFile {
    write_lines(&[
        "role,party",
        "hospital,GeneralHospital",
        "distributor,PfizerCo",
    ])
}
