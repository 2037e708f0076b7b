#[cfg(test)]
pub mod memory;
pub mod orchestrator;
pub mod patch;
pub mod store;
