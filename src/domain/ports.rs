use crate::error::Result;
use async_trait::async_trait;

/// Key-value view of the shared ledger, scoped to one invocation.
///
/// Writes are last-write-wins per key. Ordering and isolation between
/// concurrent invocations belong to the implementation, not to callers.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
    /// Returns entries with `start <= key < end` in key order. An empty
    /// bound is open on that side.
    async fn range(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>>;
}

/// Membership lookup over an externally maintained set of parties.
#[async_trait]
pub trait PartyRegistry: Send + Sync {
    async fn contains(&self, party: &str) -> Result<bool>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
pub type PartyRegistryBox = Box<dyn PartyRegistry>;
pub type LedgerStoreFactory = Box<dyn Fn() -> LedgerStoreBox + Send + Sync>;
