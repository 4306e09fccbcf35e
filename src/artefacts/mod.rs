//! Artefact generation: Markdown documents (and optional PDFs) from a spec
//!
//! The renderer is deterministic - the same normalized spec always produces
//! byte-identical documents. The pipeline adds file IO around it: read and
//! normalize the input JSON, write all three Markdown artefacts, then
//! export PDF twins when the capability is compiled in and requested.

mod error;
mod pdf;
mod pipeline;
pub mod renderer;

pub use error::ArtefactError;
pub use pdf::{WRAP_COLUMNS, pdf_export_available, wrap_line};
pub use pipeline::{Artefact, ArtefactPipeline, ArtefactReport, PdfExport};
