//! The storage agent.

mod agent;

pub use agent::StorageAgent;
