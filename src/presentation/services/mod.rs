//! The UI controller agent.

mod agent;

pub use agent::PresentationAgent;
