//! Specdaemon CLI entry point
//!
//! Assembles the component graph (credential provider → LLM client →
//! agents → registry → orchestrator) and dispatches subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use specdaemon::agents::{AgentRegistry, RequirementsAgent};
use specdaemon::artefacts::{ArtefactPipeline, PdfExport};
use specdaemon::auth::TokenProvider;
use specdaemon::cli::{Cli, Command};
use specdaemon::config::Config;
use specdaemon::llm::{LiteLlmClient, LlmClient};
use specdaemon::orchestrator::Orchestrator;
use specdaemon::server::{self, AppState};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Serve { bind } => cmd_serve(&config, bind).await,
        Command::Artefacts { input, output_dir, pdf } => cmd_artefacts(&config, input, output_dir, pdf),
        Command::Agents => cmd_agents(&config),
    }
}

/// Build the agent registry from configuration.
///
/// Registration is explicit: every routable agent is listed here, and only
/// here. Construction is offline - credentials are resolved per request.
fn build_registry(config: &Config) -> Result<AgentRegistry> {
    let tokens = Arc::new(TokenProvider::new(&config.auth).context("Failed to create token provider")?);

    let client: Arc<dyn LlmClient> =
        Arc::new(LiteLlmClient::from_config(&config.llm, tokens).context("Failed to create LLM client")?);

    let requirements =
        RequirementsAgent::new(client, config.llm.max_tokens).context("Failed to create requirements agent")?;

    let mut registry = AgentRegistry::new();
    registry.register("requirements", Arc::new(requirements));
    Ok(registry)
}

/// Run the HTTP API server
async fn cmd_serve(config: &Config, bind: Option<String>) -> Result<()> {
    // Validate credentials early - fail fast with a clear message
    config.validate()?;

    let registry = build_registry(config)?;
    let orchestrator = Orchestrator::new(registry);

    info!(model = %config.llm.model, agents = ?orchestrator.agent_names(), "starting server");

    let bind_addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let state = Arc::new(AppState { orchestrator });

    server::serve(&bind_addr, state).await
}

/// Generate artefacts from a requirements JSON file
fn cmd_artefacts(
    config: &Config,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    pdf: bool,
) -> Result<()> {
    let input_json = input.unwrap_or_else(|| config.artefacts.input_json.clone());
    let out_dir = output_dir.unwrap_or_else(|| config.artefacts.output_dir.clone());
    let export_pdf = pdf || config.artefacts.export_pdf;

    let pipeline = ArtefactPipeline::new(input_json, out_dir);
    let report = pipeline.run(export_pdf).context("Artefact generation failed")?;

    println!("Generated artefacts:");
    for artefact in &report.artefacts {
        println!("- {}: {}", artefact.name, artefact.path.display());
    }

    if report.pdf == PdfExport::Skipped {
        println!();
        println!("PDF export skipped: rebuild with --features pdf-export to enable it.");
    }

    Ok(())
}

/// List registered agents
fn cmd_agents(config: &Config) -> Result<()> {
    let registry = build_registry(config)?;

    println!("Registered agents:");
    for name in registry.names() {
        println!("- {}", name);
    }

    Ok(())
}
