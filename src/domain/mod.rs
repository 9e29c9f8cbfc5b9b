//! Domain model and the ports the contract consumes.

pub mod order;
pub mod ports;
