use crate::domain::order::Order;
use crate::domain::ports::LedgerStoreBox;
use crate::error::{OrderError, Result};
use tracing::debug;

/// Typed access to `Order` records on the ledger.
///
/// Every call goes straight to the underlying store; nothing is cached.
pub struct OrderStore {
    ledger: LedgerStoreBox,
}

impl OrderStore {
    pub fn new(ledger: LedgerStoreBox) -> Self {
        Self { ledger }
    }

    /// Reads and decodes the order stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Order> {
        let bytes = self
            .ledger
            .get(key)
            .await?
            .ok_or_else(|| OrderError::NotFound(key.to_string()))?;
        debug!(key, len = bytes.len(), "read order record");
        decode(key, &bytes)
    }

    /// Encodes `order` and writes it under `key`, replacing any prior value.
    pub async fn put(&self, key: &str, order: &Order) -> Result<()> {
        let bytes = serde_json::to_vec(order).map_err(|e| {
            OrderError::StoreError(format!("Serialization error for key {key}: {e}"))
        })?;
        debug!(key, len = bytes.len(), "write order record");
        self.ledger.put(key, bytes).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.ledger.get(key).await?.is_some())
    }

    /// Decodes every record in `[start, end)`, in key order.
    pub async fn list(&self, start: &str, end: &str) -> Result<Vec<(String, Order)>> {
        self.ledger
            .range(start, end)
            .await?
            .into_iter()
            .map(|(key, bytes)| {
                let order = decode(&key, &bytes)?;
                Ok((key, order))
            })
            .collect()
    }

    /// Finds the key of the stored order whose `orderid` is `order_id`.
    pub async fn key_of(&self, order_id: &str) -> Result<Option<String>> {
        Ok(self
            .list("", "")
            .await?
            .into_iter()
            .find(|(_, order)| order.order_id == order_id)
            .map(|(key, _)| key))
    }
}

fn decode(key: &str, bytes: &[u8]) -> Result<Order> {
    serde_json::from_slice(bytes).map_err(|e| OrderError::CorruptRecord {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
