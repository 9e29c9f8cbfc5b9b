use crate::application::order_store::OrderStore;
use crate::domain::order::{Order, OrderStatus, Price, Quantity};
use crate::domain::ports::{LedgerStoreBox, PartyRegistryBox};
use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, instrument};

/// Prefix of the keys written by [`OrderContract::initialize`].
pub const SEED_KEY_PREFIX: &str = "ORDER";

const SEED_OWNER: &str = "Kaiser Permanente";
const SEED_DISTRIBUTOR: &str = "Pfizer";

/// (drug id, quantity, price) of each demo order, in seeding order.
const SEED_ORDERS: [(&str, u64, Decimal); 7] = [
    ("117", 100, dec!(13.4)),
    ("777", 100, dec!(144)),
    ("631", 100, dec!(11.4)),
    ("222", 111, dec!(133.4)),
    ("41", 111, dec!(1313.4)),
    ("17", 111, dec!(1153.4)),
    ("1", 111, dec!(1361.4)),
];

/// The order contract: lifecycle rules for pharmaceutical orders.
///
/// Holds no mutable state of its own. Every handler reads what it needs
/// from the ledger, validates, and finishes with at most one write, so a
/// rejected invocation never leaves a partial update behind.
pub struct OrderContract {
    store: OrderStore,
    hospitals: PartyRegistryBox,
    distributors: PartyRegistryBox,
}

#[derive(Serialize)]
struct KeyedRecord<'a> {
    #[serde(rename = "Key")]
    key: &'a str,
    #[serde(rename = "Record")]
    record: &'a Order,
}

impl OrderContract {
    /// Creates a contract over `ledger`.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The key-value ledger orders are persisted to.
    /// * `hospitals` - Parties allowed to own orders.
    /// * `distributors` - Parties allowed to fulfil orders.
    pub fn new(
        ledger: LedgerStoreBox,
        hospitals: PartyRegistryBox,
        distributors: PartyRegistryBox,
    ) -> Self {
        Self {
            store: OrderStore::new(ledger),
            hospitals,
            distributors,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Seeds the demo orders under `ORDER0`..`ORDER6`.
    ///
    /// Re-running rewrites the same keys with the same values.
    #[instrument(skip_all)]
    pub async fn initialize(&self) -> Result<()> {
        for (index, (drug_id, quantity, price)) in SEED_ORDERS.into_iter().enumerate() {
            let order = Order::new(
                (index + 1).to_string(),
                SEED_OWNER,
                SEED_DISTRIBUTOR,
                drug_id,
                Quantity::new(quantity)?,
                Price::new(price)?,
            );
            let key = format!("{SEED_KEY_PREFIX}{index}");
            self.store.put(&key, &order).await?;
            info!(key = %key, order_id = %order.order_id, "seeded order");
        }
        Ok(())
    }

    /// Places a new order.
    ///
    /// Arguments: `[orderKey, orderId, owner, distributor, drugId, quantity, price, status]`.
    /// The order is stored under `orderKey` and always starts out `Ordered`.
    #[instrument(skip_all, fields(key = args.first().map(String::as_str).unwrap_or_default()))]
    pub async fn create_order(&self, args: &[String]) -> Result<()> {
        let [key, order_id, owner, distributor, drug_id, quantity, price, status] = args else {
            return Err(arity(8, args.len()));
        };

        if !self.hospitals.contains(owner).await? {
            return Err(OrderError::UnauthorizedParty(format!(
                "hospital not registered: '{owner}'"
            )));
        }
        if !self.distributors.contains(distributor).await? {
            return Err(OrderError::UnauthorizedParty(format!(
                "distributor not registered: '{distributor}'"
            )));
        }

        let quantity: Quantity = quantity.parse()?;
        let price: Price = price.parse()?;

        for (name, value) in [("orderKey", key), ("orderId", order_id), ("drugId", drug_id)] {
            if value.is_empty() {
                return Err(OrderError::ValidationError(format!("{name} must not be empty")));
            }
        }
        if status.parse::<OrderStatus>()? != OrderStatus::Ordered {
            return Err(OrderError::ValidationError(format!(
                "New orders must start as {}, got '{status}'",
                OrderStatus::Ordered
            )));
        }

        if self.store.exists(key).await? {
            return Err(OrderError::DuplicateOrder(key.clone()));
        }
        if let Some(existing) = self.store.key_of(order_id).await? {
            return Err(OrderError::DuplicateOrder(format!(
                "orderId '{order_id}' is already stored under {existing}"
            )));
        }

        let order = Order::new(order_id, owner, distributor, drug_id, quantity, price);
        self.store.put(key, &order).await?;
        info!(order_id = %order.order_id, owner = %order.owner, distributor = %order.distributor, "order created");
        Ok(())
    }

    /// Moves an existing order to a new status.
    ///
    /// Arguments: `[orderKey, callerIdentity, newStatus]`.
    #[instrument(skip_all, fields(key = args.first().map(String::as_str).unwrap_or_default()))]
    pub async fn advance_order(&self, args: &[String]) -> Result<()> {
        let [key, caller, new_status] = args else {
            return Err(arity(3, args.len()));
        };

        let mut order = self.store.get(key).await?;
        order.ensure_party(caller)?;

        let from = order.status;
        let target = new_status
            .parse::<OrderStatus>()
            .map_err(|_| OrderError::IllegalTransition {
                from: from.to_string(),
                to: new_status.clone(),
            })?;
        order.advance(caller, target)?;

        self.store.put(key, &order).await?;
        info!(caller = %caller, %from, to = %target, "order advanced");
        Ok(())
    }

    /// Returns the JSON record stored under `[orderKey]`.
    pub async fn query_order(&self, args: &[String]) -> Result<Vec<u8>> {
        let [key] = args else {
            return Err(arity(1, args.len()));
        };
        let order = self.store.get(key).await?;
        encode(&order)
    }

    /// Returns every order on the ledger as a JSON array of
    /// `{"Key": ..., "Record": ...}` entries in key order.
    pub async fn query_all_orders(&self, args: &[String]) -> Result<Vec<u8>> {
        if !args.is_empty() {
            return Err(arity(0, args.len()));
        }
        let orders = self.store.list("", "").await?;
        let records: Vec<KeyedRecord<'_>> = orders
            .iter()
            .map(|(key, record)| KeyedRecord { key, record })
            .collect();
        encode(&records)
    }
}

fn arity(expected: usize, actual: usize) -> OrderError {
    OrderError::ArgumentCount { expected, actual }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| OrderError::StoreError(format!("Serialization error: {e}")))
}
