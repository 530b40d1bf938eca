//! Registration errors.

use super::OrchestratorState;
use crate::contract::{AgentName, Namespace};
use thiserror::Error;

/// Errors returned while building an orchestrator's registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// An agent with the same name is already registered.
    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentName),

    /// Another agent already owns the namespace.
    #[error("namespace '{namespace}' is already owned by {owner}")]
    NamespaceTaken {
        /// Contested namespace.
        namespace: Namespace,
        /// Agent that owns it.
        owner: AgentName,
    },

    /// The `system` namespace belongs to the orchestrator.
    #[error("agent {0} cannot own the reserved system namespace")]
    ReservedNamespace(AgentName),

    /// Registration is only possible before start.
    #[error("cannot register agents while the orchestrator is {0}")]
    RegistrationClosed(OrchestratorState),
}
