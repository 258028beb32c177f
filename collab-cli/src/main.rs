//! Multi-Agent Collaboration CLI
//!
//! Command-line front end for the research/write/critique workflow.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;

mod cli;
mod output;

use cli::{Cli, OutputFormat};
use collab_agents::{
    AnthropicClient, AnthropicConfig, ModelOptions, TracingFaultSink, Workflow,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("collab={default_level}").parse()?)
                .add_directive(format!("collab_agents={default_level}").parse()?)
                .add_directive("warn".parse()?),
        )
        .with_target(false)
        .init();

    // Build the model client from CLI/env configuration
    let mut config = AnthropicConfig::new(cli.api_key.clone());
    config.options = ModelOptions {
        model: cli.model.clone(),
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
    };
    let options = config.options.clone();
    let client = Arc::new(AnthropicClient::new(config)?);

    // Fresh agents per run keep conversation histories run-scoped
    let mut workflow = Workflow::new(client, Arc::new(TracingFaultSink), options);
    let results = workflow.run_workflow(&cli.task).await;

    if results.is_empty() {
        bail!("workflow aborted before completion; no results produced");
    }

    match cli.output {
        OutputFormat::Text => print!("{}", output::render_cards(&results)),
        OutputFormat::Json => println!("{}", output::render_json(&results)?),
    }

    Ok(())
}
