//! Agents: capability interface and explicit registry
//!
//! An agent is anything that can run one conversation turn. Agents are
//! registered by name at startup; there is no implicit discovery, so the
//! set of routable agents is exactly what `main` assembled.

mod instructions;
mod requirements;

pub use instructions::requirements_instructions;
pub use requirements::RequirementsAgent;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::llm::LlmError;

/// One conversational capability, addressable by name through the registry.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run one turn: send the user message into the session's conversation
    /// and return the model's reply.
    async fn send_turn(&self, session_id: &str, message: &str) -> Result<String, LlmError>;
}

/// Explicit name → agent mapping, built once at startup.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under a name. Later registrations win.
    pub fn register(&mut self, name: impl Into<String>, agent: Arc<dyn Agent>) {
        self.agents.insert(name.into(), agent);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(name).cloned()
    }

    /// Registered agent names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.keys().cloned().collect();
        names.sort();
        names
    }
}
