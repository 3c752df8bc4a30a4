//! `AgentStore` — the arena of registered agents.

use std::collections::BTreeMap;

use sp_core::{AgentId, SpError, SpResult};

use crate::Agent;

/// Agents keyed by id.  Iteration is in id order, which keeps every query
/// that walks the store deterministic.
#[derive(Debug, Default)]
pub struct AgentStore {
    agents: BTreeMap<AgentId, Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// [`SpError::DuplicateAgent`] if the id is already registered.
    pub fn insert(&mut self, agent: Agent) -> SpResult<()> {
        let id = agent.id();
        if self.agents.contains_key(&id) {
            return Err(SpError::DuplicateAgent(id));
        }
        self.agents.insert(id, agent);
        Ok(())
    }

    pub fn remove(&mut self, id: AgentId) -> SpResult<Agent> {
        self.agents.remove(&id).ok_or(SpError::AgentNotFound(id))
    }

    pub fn get(&self, id: AgentId) -> SpResult<&Agent> {
        self.agents.get(&id).ok_or(SpError::AgentNotFound(id))
    }

    pub fn get_mut(&mut self, id: AgentId) -> SpResult<&mut Agent> {
        self.agents.get_mut(&id).ok_or(SpError::AgentNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
