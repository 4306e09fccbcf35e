//! Requirements-gathering agent
//!
//! Wraps the LLM client with the elicitation instructions and a session
//! store. Each turn replays the session's history so the proxy sees the
//! whole conversation; the reply is recorded before it is returned.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use tracing::debug;

use super::{Agent, requirements_instructions};
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};
use crate::session::SessionStore;

pub struct RequirementsAgent {
    client: Arc<dyn LlmClient>,
    sessions: SessionStore,
    system_prompt: String,
    max_tokens: u32,
}

impl RequirementsAgent {
    /// Build the agent, rendering its instruction template once.
    pub fn new(client: Arc<dyn LlmClient>, max_tokens: u32) -> Result<Self> {
        Ok(Self {
            client,
            sessions: SessionStore::new(),
            system_prompt: requirements_instructions()?,
            max_tokens,
        })
    }
}

#[async_trait]
impl Agent for RequirementsAgent {
    async fn send_turn(&self, session_id: &str, message: &str) -> Result<String, LlmError> {
        debug!(session_id, "send_turn: called");

        let mut messages = self.sessions.history(session_id).await;
        messages.push(Message::user(message));

        let request = CompletionRequest {
            system_prompt: self.system_prompt.clone(),
            messages,
            max_tokens: self.max_tokens,
        };

        let response = self.client.complete(request).await?;
        let reply = response.content.trim().to_string();

        self.sessions
            .record_turn(session_id, Message::user(message), Message::assistant(&reply))
            .await;

        Ok(reply)
    }
}
