//! Builds and starts the agent graph.

use super::{AppConfig, AppError, BackendKind};
use crate::agent::Agent;
use crate::orchestrator::services::Orchestrator;
use crate::presentation::ports::PresentationAdapter;
use crate::presentation::services::PresentationAgent;
use crate::storage::adapters::memory::InMemoryBackend;
use crate::storage::services::StorageAgent;
use crate::task::services::TaskAgent;
use mockable::Clock;
use std::sync::Arc;

/// Wires storage, task, and UI agents into an orchestrator and starts it.
///
/// Registration order is storage, task, UI, which is also the start and
/// stop order.
///
/// # Errors
///
/// Returns [`AppError::Registration`] or [`AppError::Startup`] when the
/// graph cannot be assembled or an agent fails to start.
pub async fn assemble<A, C>(
    config: &AppConfig,
    adapter: Arc<A>,
    clock: Arc<C>,
) -> Result<Orchestrator<C>, AppError>
where
    A: PresentationAdapter + 'static,
    C: Clock + Send + Sync + 'static,
{
    let storage: Arc<dyn Agent> = match config.storage.backend {
        BackendKind::Memory => Arc::new(StorageAgent::new(
            Arc::new(InMemoryBackend::new()),
            Arc::clone(&clock),
        )),
    };
    let tasks = TaskAgent::new(Arc::clone(&storage), Arc::clone(&clock));
    let ui = PresentationAgent::new(adapter, Arc::clone(&clock));

    let mut orchestrator = Orchestrator::new(clock);
    orchestrator.register(storage)?;
    orchestrator.register(Arc::new(tasks))?;
    orchestrator.register(Arc::new(ui))?;
    orchestrator.start().await.map_err(AppError::Startup)?;
    tracing::info!(
        app = %config.app.name,
        backend = ?config.storage.backend,
        "agents started"
    );
    Ok(orchestrator)
}
