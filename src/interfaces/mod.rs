//! Outer adapters: CSV input for invocations and registries, JSON lines out.

pub mod csv;
pub mod json;
