pub mod invocation_reader;
pub mod registry_reader;
