use crate::domain::ports::LedgerStore;
use crate::error::{OrderError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the world state (key -> record bytes).
pub const CF_STATE: &str = "state";

/// A persistent ledger backed by RocksDB.
///
/// Keys are stored as their UTF-8 bytes, so RocksDB's bytewise ordering
/// matches the string ordering `range` promises.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBLedger {
    db: Arc<DB>,
}

impl RocksDBLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "state" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_state = ColumnFamilyDescriptor::new(CF_STATE, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_state]).map_err(backend)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn state_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_STATE)
            .ok_or_else(|| OrderError::StoreError("State column family not found".to_string()))
    }
}

fn backend(e: rocksdb::Error) -> OrderError {
    OrderError::StoreError(format!("RocksDB error: {e}"))
}

#[async_trait]
impl LedgerStore for RocksDBLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.state_cf()?;
        self.db.get_cf(cf, key.as_bytes()).map_err(backend)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let cf = self.state_cf()?;
        self.db.put_cf(cf, key.as_bytes(), value).map_err(backend)
    }

    async fn range(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let cf = self.state_cf()?;
        let mode = if start.is_empty() {
            IteratorMode::Start
        } else {
            IteratorMode::From(start.as_bytes(), Direction::Forward)
        };

        let mut entries = Vec::new();
        for item in self.db.iterator_cf(cf, mode) {
            let (key, value) = item.map_err(backend)?;
            if !end.is_empty() && key.as_ref() >= end.as_bytes() {
                break;
            }
            let key = String::from_utf8(key.into_vec()).map_err(|e| {
                OrderError::StoreError(format!("Non UTF-8 key in ledger: {e}"))
            })?;
            entries.push((key, value.into_vec()));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let ledger = RocksDBLedger::open(dir.path()).expect("Failed to open RocksDB");

        assert!(ledger.db.cf_handle(CF_STATE).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_get_put() {
        let dir = tempdir().unwrap();
        let ledger = RocksDBLedger::open(dir.path()).unwrap();

        ledger.put("K1", b"one".to_vec()).await.unwrap();
        assert_eq!(ledger.get("K1").await.unwrap(), Some(b"one".to_vec()));
        assert!(ledger.get("K2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_range() {
        let dir = tempdir().unwrap();
        let ledger = RocksDBLedger::open(dir.path()).unwrap();
        for key in ["ORDER0", "ORDER1", "ORDER2", "ZETA"] {
            ledger.put(key, key.as_bytes().to_vec()).await.unwrap();
        }

        let keys: Vec<String> = ledger
            .range("ORDER1", "ZETA")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["ORDER1", "ORDER2"]);
        assert_eq!(ledger.range("", "").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_rocksdb_reopen_keeps_state() {
        let dir = tempdir().unwrap();
        {
            let ledger = RocksDBLedger::open(dir.path()).unwrap();
            ledger.put("K1", b"one".to_vec()).await.unwrap();
        }
        let ledger = RocksDBLedger::open(dir.path()).unwrap();
        assert_eq!(ledger.get("K1").await.unwrap(), Some(b"one".to_vec()));
    }
}
