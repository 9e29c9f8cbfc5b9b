//! Application layer containing the order contract.
//!
//! `OrderContract` owns the ledger adapter and the party registries and
//! exposes one handler per contract function. The dispatcher maps an
//! invocation's function name onto those handlers.

pub mod contract;
pub mod dispatcher;
pub mod order_store;
