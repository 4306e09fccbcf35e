//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// A chat completion backend.
///
/// One call, one reply. Implementations may stream internally; callers
/// always receive the collected reply text. Conversation state lives with
/// the caller (the session store), not the client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a completion request and return the full reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
