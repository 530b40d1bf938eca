//! The [`Orchestrator`]: registry owner, router, and lifecycle driver.

use super::in_flight::InFlight;
use super::registry::Registry;
use crate::agent::Agent;
use crate::contract::{
    Action, AgentError, AgentInfo, AgentName, AgentResult, AgentVersion, CorrelationId, Request,
    Response, SystemAction, WireRequest,
};
use crate::orchestrator::domain::{
    AgentFailure, OrchestratorError, OrchestratorState, ShutdownStage, ShutdownSummary,
};
use futures::FutureExt;
use mockable::Clock;
use serde_json::{Value, json};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock};

const ORCHESTRATOR_NAME: &str = "orchestrator";
const ORCHESTRATOR_VERSION: &str = "1.0.0";

/// Routes requests to the agent owning their action namespace.
///
/// [`Orchestrator::route`] is total: every request yields a [`Response`],
/// including requests for unknown namespaces, requests arriving outside the
/// `ready` state, and requests whose agent panics.
pub struct Orchestrator<C>
where
    C: Clock + Send + Sync,
{
    name: AgentName,
    version: AgentVersion,
    registry: Registry,
    state: RwLock<OrchestratorState>,
    in_flight: InFlight,
    clock: Arc<C>,
}

impl<C> Orchestrator<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty orchestrator named `orchestrator`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            name: AgentName::from_static(ORCHESTRATOR_NAME),
            version: AgentVersion::from_static(ORCHESTRATOR_VERSION),
            registry: Registry::default(),
            state: RwLock::new(OrchestratorState::Uninitialized),
            in_flight: InFlight::default(),
            clock,
        }
    }

    /// Returns the orchestrator's name, used as the sender of the responses
    /// it produces itself.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> OrchestratorState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` while requests are being routed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == OrchestratorState::Ready
    }

    /// Returns a registered agent by name.
    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&Arc<dyn Agent>> {
        self.registry.by_name(name)
    }

    /// Returns info snapshots of every agent, in registration order.
    #[must_use]
    pub fn agents(&self) -> Vec<AgentInfo> {
        self.registry.infos()
    }

    /// Registers an agent as the owner of its namespace.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError`] when the orchestrator has started, when
    /// the name or namespace is taken, or when the agent claims the
    /// `system` namespace.
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Result<(), OrchestratorError> {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if !state.accepts_registration() {
            return Err(OrchestratorError::RegistrationClosed(*state));
        }
        let name = agent.name().clone();
        let namespace = agent.namespace();
        self.registry.insert(agent)?;
        *state = OrchestratorState::Registering;
        tracing::info!(agent = %name, namespace = %namespace, "agent registered");
        Ok(())
    }

    /// Starts every agent in registration order and begins routing.
    ///
    /// Starting a ready orchestrator does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Init`] when an agent fails to start (the
    /// orchestrator stays in `registering`) or when shutdown has begun.
    pub async fn start(&self) -> AgentResult<()> {
        let state = self.state();
        if state == OrchestratorState::Ready {
            return Ok(());
        }
        if state.is_shutting_down() {
            return Err(AgentError::Init {
                agent: self.name.to_string(),
                reason: format!("orchestrator is {state}"),
            });
        }
        for agent in self.registry.iter() {
            agent.start().await?;
        }
        self.set_state(OrchestratorState::Ready);
        tracing::info!(agents = self.registry.count(), "orchestrator ready");
        Ok(())
    }

    /// Routes a typed request and returns its response.
    pub async fn route(&self, request: Request) -> Response {
        tracing::debug!(
            action = %request.action(),
            request_id = %request.id(),
            correlation_id = %request.correlation_id(),
            "routing request"
        );
        if let Action::System(system) = request.action() {
            let action = *system;
            let state = self.state();
            if state != OrchestratorState::Ready {
                return self.reject(&request, state);
            }
            let result = self.handle_system(action).await;
            return Response::from_result(&request, self.name.clone(), result, &*self.clock);
        }

        let _in_flight = self.in_flight.enter();
        let state = self.state();
        if state != OrchestratorState::Ready {
            return self.reject(&request, state);
        }
        let namespace = request.action().namespace();
        let Some(agent) = self.registry.owner(namespace).cloned() else {
            let error = AgentError::routing(format!(
                "no agent registered for namespace '{namespace}' (action '{}')",
                request.action()
            ));
            tracing::warn!(action = %request.action(), error = %error, "unroutable request");
            return Response::failure(&request, self.name.clone(), &error, &*self.clock);
        };
        tracing::debug!(
            action = %request.action(),
            request_id = %request.id(),
            correlation_id = %request.correlation_id(),
            target = %agent.name(),
            "forwarding request"
        );
        self.forward(&agent, request).await
    }

    /// Converts an untyped front-end request and routes it.
    ///
    /// Conversion failures become error responses that echo the caller's
    /// request id and correlation token when those were usable.
    pub async fn route_wire(&self, wire: WireRequest) -> Response {
        let request_id = wire.request_id.unwrap_or_default();
        let correlation_id = wire
            .correlation_id
            .as_deref()
            .and_then(|token| CorrelationId::new(token).ok())
            .unwrap_or_else(CorrelationId::generate);
        let action = wire.action.clone();
        match Request::from_wire(wire, &*self.clock) {
            Ok(request) => self.route(request).await,
            Err(err) => {
                tracing::warn!(
                    action = %action,
                    request_id = %request_id,
                    correlation_id = %correlation_id,
                    kind = %err.kind(),
                    error = %err,
                    "rejected wire request"
                );
                Response::failure_for(
                    request_id,
                    correlation_id,
                    self.name.clone(),
                    &err,
                    &*self.clock,
                )
            }
        }
    }

    /// Drains in-flight requests, flushes and stops every agent, and
    /// terminates the orchestrator.
    ///
    /// Agent failures are logged and reported in the summary; they never
    /// abort the sequence. Calling it again returns a summary flagged
    /// `repeated`.
    pub async fn shutdown(&self) -> ShutdownSummary {
        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.is_shutting_down() {
                return ShutdownSummary::repeated();
            }
            std::mem::replace(&mut *state, OrchestratorState::Draining)
        };
        tracing::info!(
            from = %previous,
            in_flight = self.in_flight.current(),
            "orchestrator draining"
        );
        self.in_flight.wait_idle().await;

        let mut summary = ShutdownSummary::default();
        for agent in self.registry.flush_order() {
            match agent.flush().await {
                Ok(()) => summary.flushed.push(agent.name().clone()),
                Err(err) => {
                    summary
                        .failures
                        .push(record_failure(agent, ShutdownStage::Flush, &err));
                }
            }
        }
        for agent in self.registry.iter() {
            let was_running = agent.is_running();
            match agent.shutdown().await {
                Ok(()) if was_running => summary.stopped.push(agent.name().clone()),
                Ok(()) => {}
                Err(err) => {
                    summary
                        .failures
                        .push(record_failure(agent, ShutdownStage::Shutdown, &err));
                }
            }
        }

        self.set_state(OrchestratorState::Terminated);
        tracing::info!(
            stopped = summary.stopped.len(),
            failures = summary.failures.len(),
            "orchestrator terminated"
        );
        summary
    }

    async fn handle_system(&self, action: SystemAction) -> AgentResult<Value> {
        match action {
            SystemAction::Status => Ok(json!({
                "orchestrator": {
                    "name": self.name,
                    "version": self.version,
                    "state": self.state(),
                    "running": self.is_running(),
                },
                "agents": self.agents(),
                "total_agents": self.registry.count(),
            })),
            SystemAction::Agents => {
                let agents = self.agents();
                let count = agents.len();
                Ok(json!({ "agents": agents, "count": count }))
            }
            SystemAction::Shutdown => {
                tracing::info!("shutdown requested");
                let summary = self.shutdown().await;
                Ok(json!({
                    "shutdown": true,
                    "flushed": summary.flushed,
                    "stopped": summary.stopped,
                    "failures": summary.failures,
                }))
            }
        }
    }

    async fn forward(&self, agent: &Arc<dyn Agent>, request: Request) -> Response {
        let request_id = request.id();
        let correlation_id = request.correlation_id().clone();
        let action = request.action().name();
        match AssertUnwindSafe(agent.handle(request)).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                let error = AgentError::internal(format!(
                    "agent {} panicked while handling '{action}': {}",
                    agent.name(),
                    panic_message(&*panic)
                ));
                tracing::error!(
                    agent = %agent.name(),
                    action,
                    request_id = %request_id,
                    correlation_id = %correlation_id,
                    error = %error,
                    "agent panicked"
                );
                Response::failure_for(
                    request_id,
                    correlation_id,
                    self.name.clone(),
                    &error,
                    &*self.clock,
                )
            }
        }
    }

    fn reject(&self, request: &Request, state: OrchestratorState) -> Response {
        let error = AgentError::routing(format!(
            "orchestrator is {state}; cannot route '{}'",
            request.action()
        ));
        tracing::warn!(
            action = %request.action(),
            correlation_id = %request.correlation_id(),
            state = %state,
            "request rejected"
        );
        Response::failure(request, self.name.clone(), &error, &*self.clock)
    }

    fn set_state(&self, next: OrchestratorState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

fn record_failure(
    agent: &Arc<dyn Agent>,
    stage: ShutdownStage,
    err: &AgentError,
) -> AgentFailure {
    tracing::warn!(
        agent = %agent.name(),
        stage = %stage,
        error = %err,
        "agent shutdown step failed"
    );
    AgentFailure::new(agent.name().clone(), stage, err)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
