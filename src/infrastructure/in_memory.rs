use crate::domain::ports::{LedgerStore, PartyRegistry};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<BTreeMap<String, Vec<u8>>>>` so clones share state and
/// range queries come back in key order. Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.state.read().await;
        Ok(state.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut state = self.state.write().await;
        state.insert(key.to_string(), value);
        Ok(())
    }

    async fn range(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };
        if let (Bound::Included(s), Bound::Excluded(e)) = (lower, upper)
            && s >= e
        {
            return Ok(Vec::new());
        }

        let state = self.state.read().await;
        Ok(state
            .range::<str, _>((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// A fixed membership table, e.g. the registered hospitals.
#[derive(Default, Clone, Debug)]
pub struct InMemoryRegistry {
    members: HashSet<String>,
}

impl InMemoryRegistry {
    /// Creates a registry with no members.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for InMemoryRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.members.extend(iter.into_iter().map(Into::into));
    }
}

#[async_trait]
impl PartyRegistry for InMemoryRegistry {
    async fn contains(&self, party: &str) -> Result<bool> {
        Ok(self.members.contains(party))
    }
}
