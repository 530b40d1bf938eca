//! Error taxonomy for the agent contract.
//!
//! [`AgentError`] is what agents raise internally; [`ResponseError`] is the
//! rendered form carried on an error [`super::Response`]. Both map onto the
//! fixed [`ErrorKind`] set so every front end can render failures as
//! `[ErrorKind]: message` without inspecting structured fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing contract values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// A sender, recipient, or agent name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// A name contains characters outside `[a-z0-9_-]`.
    #[error("name '{0}' contains invalid characters (only lowercase alphanumeric, '_' and '-')")]
    InvalidName(String),

    /// A name exceeds the 64-character limit.
    #[error("name exceeds 64 character limit: {0}")]
    NameTooLong(String),

    /// A correlation identifier is empty after trimming.
    #[error("correlation id must not be empty")]
    EmptyCorrelationId,

    /// A record identifier is zero.
    #[error("invalid record id {0}, expected a positive integer")]
    InvalidRecordId(u64),

    /// An agent version is not in `major.minor.patch` form.
    #[error("version must be in semver format (x.y.z), got '{0}'")]
    InvalidVersion(String),

    /// A response error string does not carry a known `[Kind]:` prefix.
    #[error("malformed response error '{0}'")]
    MalformedResponseError(String),
}

/// Fixed set of error categories exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    ValidationError,
    /// A referenced entity does not exist.
    NotFoundError,
    /// A backend operation failed.
    StorageError,
    /// Unknown action, unregistered agent, or orchestrator not accepting work.
    RoutingError,
    /// An agent failed during startup.
    AgentInitError,
    /// An unexpected failure, including panics caught at an agent boundary.
    InternalError,
}

impl ErrorKind {
    const ALL: [Self; 6] = [
        Self::ValidationError,
        Self::NotFoundError,
        Self::StorageError,
        Self::RoutingError,
        Self::AgentInitError,
        Self::InternalError,
    ];

    /// Returns the canonical display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::NotFoundError => "NotFoundError",
            Self::StorageError => "StorageError",
            Self::RoutingError => "RoutingError",
            Self::AgentInitError => "AgentInitError",
            Self::InternalError => "InternalError",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors raised inside agents before they are folded into a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    /// Input failed validation.
    #[error("{reason}")]
    Validation {
        /// Offending field, when one can be named.
        field: Option<String>,
        /// Human-readable reason.
        reason: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity type tag, e.g. `task`.
        entity: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// A persistence backend operation failed.
    #[error("{0}")]
    Storage(String),

    /// The action could not be routed to an owning agent.
    #[error("{0}")]
    Routing(String),

    /// An agent failed during its startup sequence.
    #[error("agent {agent} failed to start: {reason}")]
    Init {
        /// Name of the failing agent.
        agent: String,
        /// Failure description.
        reason: String,
    },

    /// An unexpected failure.
    #[error("{0}")]
    Internal(String),

    /// A failure reported on another agent's response, forwarded unchanged.
    #[error("{}", .0.message())]
    Forwarded(ResponseError),
}

impl AgentError {
    /// Creates a validation error without a field name.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            reason: reason.into(),
        }
    }

    /// Creates a validation error for a named field.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            reason: reason.into(),
        }
    }

    /// Creates a not-found error for an entity.
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a storage error from any displayable failure.
    #[must_use]
    pub fn storage(err: impl fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// Creates a routing error.
    #[must_use]
    pub fn routing(reason: impl Into<String>) -> Self {
        Self::Routing(reason.into())
    }

    /// Creates an internal error from any displayable failure.
    #[must_use]
    pub fn internal(err: impl fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    /// Returns the caller-facing category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::NotFound { .. } => ErrorKind::NotFoundError,
            Self::Storage(_) => ErrorKind::StorageError,
            Self::Routing(_) => ErrorKind::RoutingError,
            Self::Init { .. } => ErrorKind::AgentInitError,
            Self::Internal(_) => ErrorKind::InternalError,
            Self::Forwarded(error) => error.kind(),
        }
    }
}

impl From<ContractError> for AgentError {
    fn from(err: ContractError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Rendered error carried on an error response.
///
/// Serialises as the single string `[ErrorKind]: message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResponseError {
    kind: ErrorKind,
    message: String,
}

impl ResponseError {
    /// Creates a response error from its parts.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message without the `[Kind]:` prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&AgentError> for ResponseError {
    fn from(err: &AgentError) -> Self {
        match err {
            AgentError::Forwarded(error) => error.clone(),
            other => Self::new(other.kind(), other.to_string()),
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.kind, self.message)
    }
}

impl TryFrom<String> for ResponseError {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let parsed = value
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("]: "))
            .and_then(|(kind, message)| ErrorKind::parse(kind).map(|k| Self::new(k, message)));
        parsed.ok_or(ContractError::MalformedResponseError(value))
    }
}

impl From<ResponseError> for String {
    fn from(value: ResponseError) -> Self {
        value.to_string()
    }
}
