use crate::error::{OrderError, Result};
use crate::infrastructure::in_memory::InMemoryRegistry;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Hospital,
    Distributor,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RegistryEntry {
    pub role: PartyRole,
    pub party: String,
}

/// The two membership tables createOrder checks against.
#[derive(Debug, Default, Clone)]
pub struct Registries {
    pub hospitals: InMemoryRegistry,
    pub distributors: InMemoryRegistry,
}

/// Loads the hospital and distributor registries from a `role,party` CSV table.
pub struct RegistryReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RegistryReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Reads the whole table. Any malformed row fails the load.
    pub fn registries(self) -> Result<Registries> {
        let mut registries = Registries::default();
        for entry in self.reader.into_deserialize::<RegistryEntry>() {
            let entry = entry.map_err(OrderError::from)?;
            match entry.role {
                PartyRole::Hospital => registries.hospitals.extend([entry.party]),
                PartyRole::Distributor => registries.distributors.extend([entry.party]),
            }
        }
        Ok(registries)
    }
}
