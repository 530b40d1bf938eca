//! The agent abstraction.
//!
//! An agent owns one action [`crate::contract::Namespace`], turns typed
//! requests into responses, and moves through a small lifecycle
//! (`inactive -> active -> inactive`, or `error` when startup fails). The
//! orchestrator holds agents as `Arc<dyn Agent>`.

mod handler;
mod lifecycle;

pub use handler::Agent;
pub use lifecycle::AgentLifecycle;

#[cfg(test)]
mod tests;
