//! Agent registration metadata used for registry bookkeeping and health
//! reporting.

use super::{AgentName, ContractError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The agent has been started and accepts work.
    Active,
    /// The agent has not been started, or has been shut down.
    #[default]
    Inactive,
    /// The agent failed to start.
    Error,
}

impl AgentStatus {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic `major.minor.patch` version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentVersion(String);

impl AgentVersion {
    /// Creates a validated version.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidVersion`] unless the value is three
    /// dot-separated decimal numbers.
    pub fn new(value: impl Into<String>) -> Result<Self, ContractError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let segments: Vec<&str> = trimmed.split('.').collect();
        let is_valid = segments.len() == 3
            && segments
                .iter()
                .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()));
        if !is_valid {
            return Err(ContractError::InvalidVersion(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a compile-time constant that is known to satisfy the rules.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentVersion {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentVersion> for String {
    fn from(value: AgentVersion) -> Self {
        value.0
    }
}

impl fmt::Display for AgentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of an agent's identity, status, and capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    name: AgentName,
    status: AgentStatus,
    version: AgentVersion,
    supported_actions: Vec<String>,
}

impl AgentInfo {
    /// Creates an info snapshot.
    #[must_use]
    pub fn new(
        name: AgentName,
        status: AgentStatus,
        version: AgentVersion,
        supported_actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name,
            status,
            version,
            supported_actions: supported_actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the agent name.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns the agent version.
    #[must_use]
    pub const fn version(&self) -> &AgentVersion {
        &self.version
    }

    /// Returns the wire names of the actions this agent handles.
    #[must_use]
    pub fn supported_actions(&self) -> &[String] {
        &self.supported_actions
    }
}
