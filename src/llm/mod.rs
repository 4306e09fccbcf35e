//! LLM client: provider-agnostic types and the LiteLLM proxy implementation
//!
//! The daemon talks to a hosted model through a LiteLLM proxy speaking the
//! OpenAI chat-completions dialect. Everything above this module sees only
//! [`LlmClient`] and plain reply strings.

mod client;
mod error;
mod litellm;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use litellm::LiteLlmClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role};
