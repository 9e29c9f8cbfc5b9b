use crate::application::contract::OrderContract;
use crate::error::{OrderError, Result};
use std::str::FromStr;
use tracing::warn;

/// The contract functions an invocation can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    CreateOrder,
    AdvanceOrder,
    QueryOrder,
    QueryAllOrders,
}

impl FromStr for Operation {
    type Err = OrderError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "initialize" | "initLedger" => Ok(Operation::Initialize),
            "createOrder" => Ok(Operation::CreateOrder),
            "advanceOrder" | "orderTransaction" => Ok(Operation::AdvanceOrder),
            "queryOrder" => Ok(Operation::QueryOrder),
            "queryAllOrders" => Ok(Operation::QueryAllOrders),
            other => Err(OrderError::UnknownOperation(other.to_string())),
        }
    }
}

/// A function name plus its positional string arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl OrderContract {
    /// Routes an invocation to its handler.
    ///
    /// Returns the handler's payload: record bytes for queries, `None` for
    /// writes. An unknown function name fails before anything is touched.
    pub async fn invoke(&self, invocation: &Invocation) -> Result<Option<Vec<u8>>> {
        let result = match invocation.function.parse::<Operation>() {
            Ok(operation) => self.route(operation, &invocation.args).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!(function = %invocation.function, kind = ?e.kind(), "invocation rejected: {e}");
        }
        result
    }

    async fn route(&self, operation: Operation, args: &[String]) -> Result<Option<Vec<u8>>> {
        match operation {
            Operation::Initialize => self.initialize().await.map(|_| None),
            Operation::CreateOrder => self.create_order(args).await.map(|_| None),
            Operation::AdvanceOrder => self.advance_order(args).await.map(|_| None),
            Operation::QueryOrder => self.query_order(args).await.map(Some),
            Operation::QueryAllOrders => self.query_all_orders(args).await.map(Some),
        }
    }
}
