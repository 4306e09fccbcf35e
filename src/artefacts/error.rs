//! Artefact pipeline error types

use std::path::PathBuf;

use thiserror::Error;

use crate::spec::ExtractError;

/// Errors that can occur while generating artefacts.
///
/// A missing PDF backend is deliberately not represented here - export
/// absence is a structured skip in the pipeline report, never an error.
#[derive(Debug, Error)]
pub enum ArtefactError {
    #[error("input JSON not found: {0}")]
    InputNotFound(PathBuf),

    #[error("malformed input: {0}")]
    MalformedInput(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}
