//! The [`Agent`] trait.

use super::AgentLifecycle;
use crate::contract::{
    Action, AgentError, AgentInfo, AgentName, AgentResult, AgentStatus, AgentVersion, Namespace,
    Request, Response,
};
use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;

/// A component that owns one action namespace.
///
/// Implementors supply identity, a clock, the lifecycle holder, and
/// [`Agent::dispatch`]. Everything else has a provided implementation:
/// [`Agent::handle`] folds dispatch failures into error responses, and
/// [`Agent::start`] / [`Agent::shutdown`] drive the lifecycle around the
/// overridable [`Agent::on_start`] / [`Agent::on_shutdown`] hooks.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Unique agent name.
    fn name(&self) -> &AgentName;

    /// Agent version.
    fn version(&self) -> &AgentVersion;

    /// Namespace of the actions this agent owns.
    fn namespace(&self) -> Namespace;

    /// Wire names of the supported actions.
    fn supported_actions(&self) -> &'static [&'static str];

    /// Lifecycle holder.
    fn lifecycle(&self) -> &AgentLifecycle;

    /// Clock used to timestamp responses.
    fn clock(&self) -> &dyn Clock;

    /// Executes one request.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] describing why the action failed; the error
    /// is folded into an error [`Response`] by [`Agent::handle`].
    async fn dispatch(&self, request: &Request) -> AgentResult<Value>;

    /// Startup hook, run once by [`Agent::start`].
    ///
    /// # Errors
    ///
    /// Any error marks the agent as failed.
    async fn on_start(&self) -> AgentResult<()> {
        Ok(())
    }

    /// Shutdown hook, run once by [`Agent::shutdown`].
    ///
    /// # Errors
    ///
    /// Errors are reported to the caller; the agent is still marked inactive.
    async fn on_shutdown(&self) -> AgentResult<()> {
        Ok(())
    }

    /// Persists any buffered state.
    ///
    /// # Errors
    ///
    /// Returns an error when buffered state could not be written.
    async fn flush(&self) -> AgentResult<()> {
        Ok(())
    }

    /// Handles a request, always producing a response.
    async fn handle(&self, request: Request) -> Response {
        let result = self.dispatch(&request).await;
        if let Err(err) = &result {
            tracing::warn!(
                agent = %self.name(),
                action = %request.action(),
                request_id = %request.id(),
                correlation_id = %request.correlation_id(),
                kind = %err.kind(),
                error = %err,
                "action failed"
            );
        }
        Response::from_result(&request, self.name().clone(), result, self.clock())
    }

    /// Starts the agent. Calling it on an active agent does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Init`] when [`Agent::on_start`] fails; the agent
    /// is then left in the `error` status.
    async fn start(&self) -> AgentResult<()> {
        if self.lifecycle().is_active() {
            return Ok(());
        }
        if let Err(err) = self.on_start().await {
            self.lifecycle().transition(AgentStatus::Error);
            tracing::error!(agent = %self.name(), error = %err, "agent failed to start");
            return Err(AgentError::Init {
                agent: self.name().to_string(),
                reason: err.to_string(),
            });
        }
        self.lifecycle().transition(AgentStatus::Active);
        tracing::info!(agent = %self.name(), version = %self.version(), "agent started");
        Ok(())
    }

    /// Stops the agent. Calling it on an inactive agent does nothing.
    ///
    /// # Errors
    ///
    /// Returns the error raised by [`Agent::on_shutdown`].
    async fn shutdown(&self) -> AgentResult<()> {
        if self.lifecycle().transition(AgentStatus::Inactive) != AgentStatus::Active {
            return Ok(());
        }
        let outcome = self.on_shutdown().await;
        tracing::info!(agent = %self.name(), "agent stopped");
        outcome
    }

    /// Returns `true` while the agent is active.
    fn is_running(&self) -> bool {
        self.lifecycle().is_active()
    }

    /// Returns a snapshot of the agent's identity and status.
    fn info(&self) -> AgentInfo {
        AgentInfo::new(
            self.name().clone(),
            self.lifecycle().status(),
            self.version().clone(),
            self.supported_actions().iter().copied(),
        )
    }

    /// Builds the routing error for an action outside this agent's namespace.
    fn unsupported(&self, action: &Action) -> AgentError {
        AgentError::routing(format!(
            "agent {} does not handle action '{}'",
            self.name(),
            action.name()
        ))
    }
}
