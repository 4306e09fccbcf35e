//! Agent orchestration
//!
//! Routes a named agent's session/message pair to the registered handler.
//! Upstream failures pass through unmodified and unretried; retry policy
//! belongs to the provider client, error translation to the HTTP layer.

use thiserror::Error;
use tracing::debug;

use crate::agents::AgentRegistry;
use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error(transparent)]
    Upstream(#[from] LlmError),
}

pub struct Orchestrator {
    registry: AgentRegistry,
}

impl Orchestrator {
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }

    /// Run one conversation turn through the named agent.
    pub async fn chat(&self, agent: &str, session_id: &str, message: &str) -> Result<String, OrchestratorError> {
        debug!(agent, session_id, "chat: called");

        let handler = self
            .registry
            .get(agent)
            .ok_or_else(|| OrchestratorError::UnknownAgent(agent.to_string()))?;

        Ok(handler.send_turn(session_id, message).await?)
    }

    /// Names of all routable agents.
    pub fn agent_names(&self) -> Vec<String> {
        self.registry.names()
    }
}
