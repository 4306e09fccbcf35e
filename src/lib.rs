//! Specdaemon - requirements elicitation and artefact generation
//!
//! A small backend that chains calls to a hosted LLM to turn an informal
//! product idea into a structured requirements object, then renders that
//! object into human-readable documents.
//!
//! # Data flow
//!
//! user message → [`Orchestrator`](orchestrator::Orchestrator) → agent →
//! reply text → [`extract_json_block`](spec::extract_json_block) →
//! [`infer_done`](spec::infer_done) → (when done)
//! [`normalize`](spec::normalize) →
//! [`ArtefactPipeline`](artefacts::ArtefactPipeline) → documents on disk.
//!
//! # Modules
//!
//! - [`spec`] - extraction, completion detection, normalization (the core)
//! - [`artefacts`] - Markdown rendering, optional PDF export, pipeline
//! - [`agents`] - capability trait, registry, requirements agent
//! - [`llm`] - LiteLLM proxy client
//! - [`auth`] - injected OAuth token provider
//! - [`server`] - axum HTTP layer
//! - [`config`] - configuration types and loading

pub mod agents;
pub mod artefacts;
pub mod auth;
pub mod cli;
pub mod config;
pub mod llm;
pub mod orchestrator;
pub mod server;
pub mod session;
pub mod spec;

// Re-export commonly used types
pub use artefacts::{ArtefactError, ArtefactPipeline, ArtefactReport, PdfExport};
pub use config::Config;
pub use llm::{LiteLlmClient, LlmClient, LlmError};
pub use orchestrator::{Orchestrator, OrchestratorError};
pub use spec::{RequirementsSpec, extract_json_block, infer_done, normalize};
