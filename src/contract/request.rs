//! The immutable request record.

use super::{Action, AgentName, CorrelationId, RequestId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A typed command addressed to the orchestrator or to an agent.
///
/// # Invariants
///
/// - Fields are private and never change after construction.
/// - The action is a typed [`Action`], so it can never be empty.
/// - `correlation_id` is always populated; child requests inherit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    id: RequestId,
    sender: AgentName,
    recipient: AgentName,
    action: Action,
    timestamp: DateTime<Utc>,
    correlation_id: CorrelationId,
}

impl Request {
    /// Creates a request with generated id, timestamp, and correlation id.
    ///
    /// The recipient defaults to the conventional owner of the action's
    /// namespace.
    #[must_use]
    pub fn new(sender: AgentName, action: Action, clock: &(impl Clock + ?Sized)) -> Self {
        Self::builder(sender, action).build(clock)
    }

    /// Returns a builder for supplying caller-chosen identifiers.
    #[must_use]
    pub const fn builder(sender: AgentName, action: Action) -> RequestBuilder {
        RequestBuilder {
            sender,
            action,
            recipient: None,
            id: None,
            correlation_id: None,
            timestamp: None,
        }
    }

    /// Creates a causally related request that shares this request's
    /// correlation id.
    #[must_use]
    pub fn child(
        &self,
        sender: AgentName,
        action: Action,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self::builder(sender, action)
            .with_correlation_id(self.correlation_id.clone())
            .build(clock)
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the sender name.
    #[must_use]
    pub const fn sender(&self) -> &AgentName {
        &self.sender
    }

    /// Returns the informational recipient name.
    #[must_use]
    pub const fn recipient(&self) -> &AgentName {
        &self.recipient
    }

    /// Returns the typed action and its payload.
    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the correlation identifier.
    #[must_use]
    pub const fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}

/// Builder for [`Request`] values with optional caller-supplied metadata.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    sender: AgentName,
    action: Action,
    recipient: Option<AgentName>,
    id: Option<RequestId>,
    correlation_id: Option<CorrelationId>,
    timestamp: Option<DateTime<Utc>>,
}

impl RequestBuilder {
    /// Sets the recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: AgentName) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Sets the request identifier.
    #[must_use]
    pub const fn with_id(mut self, id: RequestId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the correlation identifier.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the request, generating any metadata not supplied.
    #[must_use]
    pub fn build(self, clock: &(impl Clock + ?Sized)) -> Request {
        let recipient = self
            .recipient
            .unwrap_or_else(|| AgentName::from_static(self.action.namespace().default_owner()));
        Request {
            id: self.id.unwrap_or_default(),
            sender: self.sender,
            recipient,
            action: self.action,
            timestamp: self.timestamp.unwrap_or_else(|| clock.utc()),
            correlation_id: self.correlation_id.unwrap_or_else(CorrelationId::generate),
        }
    }
}
