//! The orchestrator service.

mod in_flight;
mod orchestrator;
mod registry;

pub use orchestrator::Orchestrator;
