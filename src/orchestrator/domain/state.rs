//! Orchestrator lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an orchestrator.
///
/// Transitions only move forward:
/// `Uninitialized → Registering → Ready → Draining → Terminated`.
/// `start` may skip `Registering` when no agent was registered, and
/// `shutdown` may be called from any state before `Draining`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestratorState {
    /// Created, nothing registered yet.
    #[default]
    Uninitialized,
    /// At least one agent registered, not started.
    Registering,
    /// Started; requests are routed.
    Ready,
    /// Shutting down; new requests are rejected while in-flight ones finish.
    Draining,
    /// Shut down; every request is rejected.
    Terminated,
}

impl OrchestratorState {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Registering => "registering",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        }
    }

    /// Returns `true` while agents may still be registered.
    #[must_use]
    pub const fn accepts_registration(self) -> bool {
        matches!(self, Self::Uninitialized | Self::Registering)
    }

    /// Returns `true` once shutdown has begun.
    #[must_use]
    pub const fn is_shutting_down(self) -> bool {
        matches!(self, Self::Draining | Self::Terminated)
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
