//! Shared lifecycle state for agents.

use crate::contract::AgentStatus;
use std::sync::{PoisonError, RwLock};

/// Holds an agent's lifecycle status.
///
/// Agents embed one of these and expose it through
/// [`super::Agent::lifecycle`]; the provided `start` and `shutdown` methods
/// drive it.
#[derive(Debug, Default)]
pub struct AgentLifecycle {
    status: RwLock<AgentStatus>,
}

impl AgentLifecycle {
    /// Creates an inactive lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> AgentStatus {
        *self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the current status and returns the previous one.
    pub fn transition(&self, next: AgentStatus) -> AgentStatus {
        let mut guard = self.status.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Returns `true` while the agent is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == AgentStatus::Active
    }
}
