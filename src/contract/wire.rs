//! Untyped request form accepted from front ends.
//!
//! Console, HTTP, and conversational callers that only have strings and JSON
//! maps submit a [`WireRequest`]; it is converted into a typed [`Request`]
//! exactly once, at the boundary.

use super::{Action, AgentError, AgentName, AgentResult, CorrelationId, Record, Request, RequestId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A request as received from an untyped front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    /// Caller-supplied request id.
    #[serde(default)]
    pub request_id: Option<RequestId>,
    /// Sender name.
    pub sender: String,
    /// Informational recipient name.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Action name, e.g. `task_add`.
    pub action: String,
    /// Action payload.
    #[serde(default)]
    pub payload: Record,
    /// Caller-supplied timestamp.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Caller-supplied correlation token.
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl WireRequest {
    /// Creates a wire request with an empty payload.
    #[must_use]
    pub fn new(sender: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            request_id: None,
            sender: sender.into(),
            recipient: None,
            action: action.into(),
            payload: Record::new(),
            timestamp: None,
            correlation_id: None,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Record) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the correlation token.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

impl Request {
    /// Converts an untyped wire request into a typed request.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Validation`] for blank or malformed sender,
    /// recipient, or correlation id and for payloads that do not fit the
    /// action, and [`AgentError::Routing`] for unknown actions.
    pub fn from_wire(wire: WireRequest, clock: &(impl Clock + ?Sized)) -> AgentResult<Self> {
        let WireRequest {
            request_id,
            sender,
            recipient,
            action,
            payload,
            timestamp,
            correlation_id,
        } = wire;

        let sender_name = AgentName::new(sender)
            .map_err(|err| AgentError::invalid_field("sender", err.to_string()))?;
        let typed_action = Action::from_wire(&action, payload)?;

        let mut builder = Self::builder(sender_name, typed_action);
        if let Some(raw_recipient) = recipient {
            let recipient_name = AgentName::new(raw_recipient)
                .map_err(|err| AgentError::invalid_field("recipient", err.to_string()))?;
            builder = builder.with_recipient(recipient_name);
        }
        if let Some(id) = request_id {
            builder = builder.with_id(id);
        }
        if let Some(token) = correlation_id {
            let correlation = CorrelationId::new(token)
                .map_err(|err| AgentError::invalid_field("correlation_id", err.to_string()))?;
            builder = builder.with_correlation_id(correlation);
        }
        if let Some(at) = timestamp {
            builder = builder.with_timestamp(at);
        }
        Ok(builder.build(clock))
    }
}
