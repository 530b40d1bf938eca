//! Orchestrator lifecycle states, registration errors, and shutdown reports.

mod error;
mod state;
mod summary;

pub use error::OrchestratorError;
pub use state::OrchestratorState;
pub use summary::{AgentFailure, ShutdownStage, ShutdownSummary};
