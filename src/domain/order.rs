use crate::error::OrderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// Number of units in an order.
///
/// Always strictly positive. The invariant is re-checked when a record is
/// decoded from the ledger, so a stored zero surfaces as a corrupt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(value: u64) -> Result<Self, OrderError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(OrderError::ValidationError(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Quantity {
    type Error = OrderError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u64>().map_err(|_| {
            OrderError::ValidationError(format!("Quantity must be a positive integer, got '{s}'"))
        })?;
        Self::new(value)
    }
}

/// Unit price of an order.
///
/// Currency is carried as a `rust_decimal::Decimal` everywhere: exact and
/// never negative. Records hold it as a bare JSON number written digit for
/// digit (`13.40`, not `13.4`), and decoding re-checks the sign.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, OrderError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(OrderError::ValidationError(
                "Price must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = OrderError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

impl FromStr for Price {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| {
            OrderError::ValidationError(format!("Price must be a decimal number, got '{s}'"))
        })?;
        Self::new(value)
    }
}

/// Lifecycle status of an order.
///
/// `Received` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Ordered,
    Shipped,
    Received,
    Cancelled,
}

/// The part a caller plays on a given order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Distributor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => f.write_str("owner"),
            Role::Distributor => f.write_str("distributor"),
        }
    }
}

/// Every legal edge of the status graph and who may take it.
const TRANSITIONS: &[(OrderStatus, OrderStatus, &[Role])] = &[
    (OrderStatus::Ordered, OrderStatus::Shipped, &[Role::Distributor]),
    (OrderStatus::Shipped, OrderStatus::Received, &[Role::Owner]),
    (
        OrderStatus::Ordered,
        OrderStatus::Cancelled,
        &[Role::Owner, Role::Distributor],
    ),
    (
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
        &[Role::Owner, Role::Distributor],
    ),
];

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }

    /// Roles allowed to move an order from `self` to `to`, or `None` if no
    /// such edge exists.
    pub fn permitted_roles(self, to: OrderStatus) -> Option<&'static [Role]> {
        TRANSITIONS
            .iter()
            .find(|(from, target, _)| *from == self && *target == to)
            .map(|(_, _, roles)| *roles)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "Ordered",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Received => "Received",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ordered" => Ok(OrderStatus::Ordered),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Received" => Ok(OrderStatus::Received),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::ValidationError(format!(
                "Unknown order status '{other}'"
            ))),
        }
    }
}

/// A pharmaceutical order placed by a hospital with a distributor.
///
/// Owner and distributor are fixed at creation; only the status moves,
/// and only through [`Order::advance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderid")]
    pub order_id: String,
    pub owner: String,
    pub distributor: String,
    #[serde(rename = "drugid")]
    pub drug_id: String,
    pub quantity: Quantity,
    pub price: Price,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a freshly placed order in the `Ordered` state.
    pub fn new(
        order_id: impl Into<String>,
        owner: impl Into<String>,
        distributor: impl Into<String>,
        drug_id: impl Into<String>,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            owner: owner.into(),
            distributor: distributor.into(),
            drug_id: drug_id.into(),
            quantity,
            price,
            status: OrderStatus::Ordered,
        }
    }

    /// Roles `caller` holds on this order. Empty for outsiders.
    pub fn roles_of(&self, caller: &str) -> Vec<Role> {
        let mut roles = Vec::with_capacity(2);
        if self.owner == caller {
            roles.push(Role::Owner);
        }
        if self.distributor == caller {
            roles.push(Role::Distributor);
        }
        roles
    }

    /// Fails unless `caller` is the owner or the distributor.
    pub fn ensure_party(&self, caller: &str) -> Result<Vec<Role>, OrderError> {
        let roles = self.roles_of(caller);
        if roles.is_empty() {
            return Err(OrderError::UnauthorizedParty(format!(
                "'{caller}' is neither owner nor distributor of order {}",
                self.order_id
            )));
        }
        Ok(roles)
    }

    /// Moves the order to `target` on behalf of `caller`.
    ///
    /// Outsiders are rejected before the edge is looked up; a missing edge is
    /// an illegal transition; an existing edge taken by the wrong party is an
    /// authorization failure. The order is untouched on error.
    pub fn advance(&mut self, caller: &str, target: OrderStatus) -> Result<(), OrderError> {
        let roles = self.ensure_party(caller)?;

        let permitted =
            self.status
                .permitted_roles(target)
                .ok_or_else(|| OrderError::IllegalTransition {
                    from: self.status.to_string(),
                    to: target.to_string(),
                })?;

        if !roles.iter().any(|role| permitted.contains(role)) {
            let required = permitted
                .iter()
                .map(Role::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(OrderError::UnauthorizedParty(format!(
                "'{caller}' cannot move order {} from {} to {}: requires {required}",
                self.order_id, self.status, target
            )));
        }

        self.status = target;
        Ok(())
    }
}
