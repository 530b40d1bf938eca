//! The response record returned for every request.

use super::{AgentError, AgentName, AgentResult, CorrelationId, Request, RequestId, ResponseError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire-level status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The action succeeded and a result is present.
    Success,
    /// The action failed and an error is present.
    Error,
}

impl ResponseStatus {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result or error of a response; exactly one is ever present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Successful outcome.
    Success {
        /// Action-specific result document.
        result: Value,
    },
    /// Failed outcome.
    Error {
        /// Rendered `[ErrorKind]: message` error.
        error: ResponseError,
    },
}

/// Response to a [`Request`], annotated with the request and correlation ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    request_id: RequestId,
    correlation_id: CorrelationId,
    sender: AgentName,
    #[serde(flatten)]
    outcome: Outcome,
    timestamp: DateTime<Utc>,
}

impl Response {
    /// Creates a success response for a request.
    #[must_use]
    pub fn success(
        request: &Request,
        sender: AgentName,
        result: Value,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self::with_outcome(
            request.id(),
            request.correlation_id().clone(),
            sender,
            Outcome::Success { result },
            clock,
        )
    }

    /// Creates an error response for a request.
    #[must_use]
    pub fn failure(
        request: &Request,
        sender: AgentName,
        error: &AgentError,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self::failure_for(
            request.id(),
            request.correlation_id().clone(),
            sender,
            error,
            clock,
        )
    }

    /// Creates an error response when no typed request could be built.
    #[must_use]
    pub fn failure_for(
        request_id: RequestId,
        correlation_id: CorrelationId,
        sender: AgentName,
        error: &AgentError,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self::with_outcome(
            request_id,
            correlation_id,
            sender,
            Outcome::Error {
                error: ResponseError::from(error),
            },
            clock,
        )
    }

    /// Folds an agent result into a response.
    #[must_use]
    pub fn from_result(
        request: &Request,
        sender: AgentName,
        result: AgentResult<Value>,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        match result {
            Ok(value) => Self::success(request, sender, value, clock),
            Err(err) => Self::failure(request, sender, &err, clock),
        }
    }

    fn with_outcome(
        request_id: RequestId,
        correlation_id: CorrelationId,
        sender: AgentName,
        outcome: Outcome,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self {
            request_id,
            correlation_id,
            sender,
            outcome,
            timestamp: clock.utc(),
        }
    }

    /// Returns the originating request identifier.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the correlation identifier of the originating request.
    #[must_use]
    pub const fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Returns the name of the responding agent.
    #[must_use]
    pub const fn sender(&self) -> &AgentName {
        &self.sender
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the response timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the wire status.
    #[must_use]
    pub const fn status(&self) -> ResponseStatus {
        match self.outcome {
            Outcome::Success { .. } => ResponseStatus::Success,
            Outcome::Error { .. } => ResponseStatus::Error,
        }
    }

    /// Returns `true` for a success response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Returns the result document of a success response.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Success { result } => Some(result),
            Outcome::Error { .. } => None,
        }
    }

    /// Returns the error of a failed response.
    #[must_use]
    pub const fn error(&self) -> Option<&ResponseError> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Error { error } => Some(error),
        }
    }

    /// Converts the response into its result, consuming it.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ResponseError`] for a failed response.
    pub fn into_result(self) -> Result<Value, ResponseError> {
        match self.outcome {
            Outcome::Success { result } => Ok(result),
            Outcome::Error { error } => Err(error),
        }
    }
}
