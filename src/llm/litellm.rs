//! LiteLLM proxy client
//!
//! Speaks the OpenAI chat-completions dialect against a LiteLLM gateway.
//! Every request carries two credentials: the OAuth bearer token from the
//! injected [`TokenProvider`] and the proxy's own API key. Replies are
//! always streamed over SSE and collected into a single string - the
//! turn-runner contract upstream of this module is "one message in, one
//! reply string out".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, Role};
use crate::auth::TokenProvider;
use crate::config::LlmConfig;

/// Maximum number of retries for establishing the stream
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// LiteLLM proxy client
pub struct LiteLlmClient {
    model: String,
    api_key_env: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    tokens: Arc<TokenProvider>,
}

impl LiteLlmClient {
    /// Create a new client from configuration.
    ///
    /// The proxy API key environment variable is resolved per request, not
    /// here, so construction never touches the environment.
    pub fn from_config(config: &LlmConfig, tokens: Arc<TokenProvider>) -> Result<Self, LlmError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
            tokens,
        })
    }

    fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env)
            .map_err(|_| LlmError::Config(format!("{} environment variable not set", self.api_key_env)))
    }

    /// Build the request body for the chat-completions endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system_prompt,
        })];
        messages.extend(convert_messages(&request.messages));

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "stream": true,
        })
    }
}

/// Convert internal Message types to the OpenAI wire format
fn convert_messages(messages: &[Message]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            serde_json::json!({
                "role": role,
                "content": msg.content,
            })
        })
        .collect()
}

#[async_trait]
impl LlmClient for LiteLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, message_count = %request.messages.len(), "complete: called");

        let bearer = self.tokens.get_token().await?;
        let api_key = self.api_key()?;
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        // Retry loop for establishing the stream; once data flows, errors
        // propagate to the caller unretried.
        let mut last_error = None;
        let mut es = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(attempt, backoff_ms = backoff, "complete: retrying connection after error");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            let http_request = self
                .http
                .post(url.clone())
                .header("Authorization", format!("Bearer {bearer}"))
                .header("x-litellm-api-key", api_key.clone())
                .header("content-type", "application/json")
                .json(&body);

            match EventSource::new(http_request) {
                Ok(event_source) => {
                    es = Some(event_source);
                    break;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "complete: EventSource creation failed");
                    last_error = Some(LlmError::InvalidResponse(e.to_string()));
                }
            }
        }

        let mut es = es.ok_or_else(|| {
            last_error.unwrap_or_else(|| LlmError::InvalidResponse("failed to create EventSource".to_string()))
        })?;

        let mut content = String::new();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("complete: stream open");
                }
                Ok(Event::Message(msg)) => {
                    if msg.data.trim() == "[DONE]" {
                        break;
                    }

                    let chunk: StreamChunk = serde_json::from_str(&msg.data).map_err(LlmError::Json)?;
                    if let Some(choice) = chunk.choices.first() {
                        if let Some(delta) = &choice.delta.content {
                            content.push_str(delta);
                        }
                        if let Some(reason) = &choice.finish_reason {
                            debug!(%reason, "complete: finish reason received");
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    debug!("complete: stream ended");
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidStatusCode(code, response)) => {
                    let message = response.text().await.unwrap_or_default();
                    return Err(LlmError::ApiError {
                        status: code.as_u16(),
                        message,
                    });
                }
                Err(e) => {
                    return Err(LlmError::InvalidResponse(e.to_string()));
                }
            }
        }

        debug!(reply_chars = content.len(), "complete: stream collected");
        Ok(CompletionResponse { content })
    }
}

// LiteLLM streaming wire types (OpenAI dialect)

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    fn test_client() -> LiteLlmClient {
        let tokens = Arc::new(TokenProvider::new(&AuthConfig::default()).unwrap());
        LiteLlmClient {
            model: "groq/llama-3.3-70b-versatile".to_string(),
            api_key_env: "LITELLM_API_KEY".to_string(),
            base_url: "https://litellm.example.com".to_string(),
            http: Client::new(),
            max_tokens: 4096,
            tokens,
        }
    }

    #[test]
    fn test_build_request_body_prepends_system_prompt() {
        let client = test_client();
        let request = CompletionRequest {
            system_prompt: "You are helpful".to_string(),
            messages: vec![Message::user("Hello")],
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);

        assert_eq!(body["model"], "groq/llama-3.3-70b-versatile");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Hello");
    }

    #[test]
    fn test_max_tokens_capped_to_client_limit() {
        let client = test_client();
        let request = CompletionRequest {
            system_prompt: "Test".to_string(),
            messages: vec![],
            max_tokens: 100_000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_stream_chunk_parses_delta() {
        let data = r#"{"choices":[{"delta":{"content":"Hel"},"finish_reason":null}]}"#;
        let chunk: StreamChunk = serde_json::from_str(data).unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hel"));
    }

    #[test]
    fn test_stream_chunk_tolerates_missing_choices() {
        let chunk: StreamChunk = serde_json::from_str("{}").unwrap();
        assert!(chunk.choices.is_empty());
    }
}
