//! HTTP API
//!
//! Thin axum layer over the orchestrator. One substantive route: `POST
//! /chat` runs a conversation turn, then extracts a spec and the completion
//! verdict from the reply so clients never parse model output themselves.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::orchestrator::{Orchestrator, OrchestratorError};
use crate::spec::{extract_json_block, infer_done};

/// Shared state for all handlers
pub struct AppState {
    pub orchestrator: Orchestrator,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub agent: String,
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub done: bool,
    /// The extracted spec object, null unless a JSON block was found this turn
    pub spec: Option<Map<String, Value>>,
}

/// Error shape returned to HTTP clients
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        let status = match &err {
            OrchestratorError::UnknownAgent(_) => StatusCode::NOT_FOUND,
            OrchestratorError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind_addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .context(format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, "serve: listening");
    axum::serve(listener, router(state).into_make_service())
        .await
        .context("server error")?;

    Ok(())
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "specdaemon is running" }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = state
        .orchestrator
        .chat(&req.agent, &req.session_id, &req.message)
        .await
        .inspect_err(|e| error!(agent = %req.agent, error = %e, "chat_handler: turn failed"))?;

    let spec = extract_json_block(&reply);
    let done = infer_done(&reply, spec.as_ref());

    Ok(Json(ChatResponse {
        session_id: req.session_id,
        reply,
        done,
        spec,
    }))
}
