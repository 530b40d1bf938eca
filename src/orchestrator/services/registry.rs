//! Registration-ordered agent table with a namespace index.

use crate::agent::Agent;
use crate::contract::{AgentInfo, Namespace};
use crate::orchestrator::domain::OrchestratorError;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub(super) struct Registry {
    agents: Vec<Arc<dyn Agent>>,
    routes: HashMap<Namespace, usize>,
}

impl Registry {
    pub(super) fn insert(&mut self, agent: Arc<dyn Agent>) -> Result<(), OrchestratorError> {
        let namespace = agent.namespace();
        if namespace == Namespace::System {
            return Err(OrchestratorError::ReservedNamespace(agent.name().clone()));
        }
        if self.agents.iter().any(|known| known.name() == agent.name()) {
            return Err(OrchestratorError::DuplicateAgent(agent.name().clone()));
        }
        if let Some(owner) = self.owner(namespace) {
            return Err(OrchestratorError::NamespaceTaken {
                namespace,
                owner: owner.name().clone(),
            });
        }
        self.routes.insert(namespace, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    pub(super) fn owner(&self, namespace: Namespace) -> Option<&Arc<dyn Agent>> {
        self.routes
            .get(&namespace)
            .and_then(|index| self.agents.get(*index))
    }

    pub(super) fn by_name(&self, name: &str) -> Option<&Arc<dyn Agent>> {
        self.agents.iter().find(|agent| agent.name().as_str() == name)
    }

    /// Agents in registration order.
    pub(super) fn iter(&self) -> impl Iterator<Item = &Arc<dyn Agent>> {
        self.agents.iter()
    }

    /// Persistence agents first, then the rest; registration order within
    /// each group.
    pub(super) fn flush_order(&self) -> impl Iterator<Item = &Arc<dyn Agent>> {
        let storage = self
            .agents
            .iter()
            .filter(|agent| agent.namespace() == Namespace::Storage);
        let others = self
            .agents
            .iter()
            .filter(|agent| agent.namespace() != Namespace::Storage);
        storage.chain(others)
    }

    pub(super) fn infos(&self) -> Vec<AgentInfo> {
        self.agents.iter().map(|agent| agent.info()).collect()
    }

    pub(super) fn count(&self) -> usize {
        self.agents.len()
    }
}
