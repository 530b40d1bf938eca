//! Shutdown report.

use crate::contract::{AgentError, AgentName};
use serde::Serialize;
use std::fmt;

/// Shutdown step during which an agent failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownStage {
    /// [`crate::agent::Agent::flush`]
    Flush,
    /// [`crate::agent::Agent::shutdown`]
    Shutdown,
}

impl fmt::Display for ShutdownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flush => "flush",
            Self::Shutdown => "shutdown",
        })
    }
}

/// A non-fatal failure recorded during shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentFailure {
    /// Failing agent.
    pub agent: AgentName,
    /// Step that failed.
    pub stage: ShutdownStage,
    /// `[Kind]: message` rendering of the error.
    pub error: String,
}

impl AgentFailure {
    pub(crate) fn new(agent: AgentName, stage: ShutdownStage, err: &AgentError) -> Self {
        Self {
            agent,
            stage,
            error: format!("[{}]: {err}", err.kind()),
        }
    }
}

/// What a shutdown did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShutdownSummary {
    /// `true` when shutdown had already been requested; nothing else was done.
    pub repeated: bool,
    /// Agents flushed successfully, in flush order.
    pub flushed: Vec<AgentName>,
    /// Agents that were running and have been stopped, in registration order.
    pub stopped: Vec<AgentName>,
    /// Failures that were logged and skipped.
    pub failures: Vec<AgentFailure>,
}

impl ShutdownSummary {
    pub(crate) fn repeated() -> Self {
        Self {
            repeated: true,
            ..Self::default()
        }
    }
}
