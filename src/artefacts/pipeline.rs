//! Artefact generation pipeline
//!
//! Reads the requirements JSON from disk, normalizes it, and writes the
//! three Markdown artefacts (plus optional PDF twins) to the output
//! directory. All Markdown exists on disk before any PDF export starts.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::ArtefactError;
use super::pdf;
use super::renderer;
use crate::spec::{RequirementsSpec, parse_json_loose};

/// One generated output file.
#[derive(Debug, Clone)]
pub struct Artefact {
    pub name: String,
    pub path: PathBuf,
}

/// Outcome of the optional PDF export step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfExport {
    /// Export was not requested for this run.
    NotRequested,
    /// PDFs were written alongside the Markdown.
    Exported,
    /// Export was requested but the backend is not compiled in.
    Skipped,
}

/// Everything a pipeline run produced.
#[derive(Debug)]
pub struct ArtefactReport {
    pub artefacts: Vec<Artefact>,
    pub pdf: PdfExport,
}

/// Reads requirements JSON and generates project artefacts (md/pdf).
pub struct ArtefactPipeline {
    input_json: PathBuf,
    output_dir: PathBuf,
}

impl ArtefactPipeline {
    pub fn new(input_json: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_json: input_json.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Run the pipeline end to end.
    ///
    /// Markdown write failures propagate; a missing PDF backend downgrades
    /// to a warning and a [`PdfExport::Skipped`] report entry.
    pub fn run(&self, export_pdf: bool) -> Result<ArtefactReport, ArtefactError> {
        let spec = self.load_spec()?;
        fs::create_dir_all(&self.output_dir)?;

        let documents = [
            ("requirements_summary.md", renderer::requirements_summary(&spec)),
            ("user_stories.md", renderer::user_stories(&spec)),
            ("scope_constraints.md", renderer::scope_constraints(&spec)),
        ];

        let mut artefacts = Vec::new();
        for (name, content) in &documents {
            let path = self.output_dir.join(name);
            fs::write(&path, content)?;
            debug!(artefact = name, path = %path.display(), "run: wrote markdown");
            artefacts.push(Artefact {
                name: (*name).to_string(),
                path,
            });
        }

        let pdf_status = if !export_pdf {
            PdfExport::NotRequested
        } else if !pdf::pdf_export_available() {
            warn!("PDF export requested but the pdf-export feature is not compiled in; skipping");
            PdfExport::Skipped
        } else {
            let twins = self.export_pdfs(&documents)?;
            artefacts.extend(twins);
            PdfExport::Exported
        };

        info!(
            count = artefacts.len(),
            output_dir = %self.output_dir.display(),
            "run: artefact generation complete"
        );

        Ok(ArtefactReport {
            artefacts,
            pdf: pdf_status,
        })
    }

    /// Read and normalize the input file.
    fn load_spec(&self) -> Result<RequirementsSpec, ArtefactError> {
        if !self.input_json.exists() {
            return Err(ArtefactError::InputNotFound(self.input_json.clone()));
        }

        let raw = fs::read_to_string(&self.input_json)?;
        let parsed = parse_json_loose(raw.trim())?;
        Ok(crate::spec::normalize(&parsed))
    }

    #[cfg(feature = "pdf-export")]
    fn export_pdfs(&self, documents: &[(&str, String)]) -> Result<Vec<Artefact>, ArtefactError> {
        let mut twins = Vec::new();
        for (name, content) in documents {
            let pdf_name = std::path::Path::new(name)
                .with_extension("pdf")
                .to_string_lossy()
                .into_owned();
            let path = self.output_dir.join(&pdf_name);
            pdf::write_pdf(content, &path)?;
            debug!(artefact = %pdf_name, "export_pdfs: wrote pdf");
            twins.push(Artefact { name: pdf_name, path });
        }
        Ok(twins)
    }

    #[cfg(not(feature = "pdf-export"))]
    fn export_pdfs(&self, _documents: &[(&str, String)]) -> Result<Vec<Artefact>, ArtefactError> {
        // Unreachable: run() checks pdf_export_available() first
        Ok(Vec::new())
    }
}
