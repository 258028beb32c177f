//! CLI argument parsing

use clap::{Parser, ValueEnum};

use collab_agents::clients::anthropic::DEFAULT_MODEL;

/// Multi-Agent Collaboration CLI
///
/// Runs a task through three collaborating agents: a researcher analyzes
/// the topic, a writer turns the research into a structured explanation,
/// and a critic reviews the result.
#[derive(Parser, Debug)]
#[command(name = "collab")]
#[command(author = "Agent Collab Team")]
#[command(version)]
#[command(about = "Run a three-agent research/write/critique workflow", long_about = None)]
pub struct Cli {
    /// Task for the agents to collaborate on,
    /// e.g. "Explain the theory of relativity"
    pub task: String,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model identifier
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Response-size ceiling in tokens
    #[arg(long, env = "ANTHROPIC_MAX_TOKENS", default_value_t = 1000)]
    pub max_tokens: u32,

    /// Sampling temperature
    #[arg(long, env = "ANTHROPIC_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", env = "COLLAB_OUTPUT")]
    pub output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How results are rendered.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Per-agent cards on stdout.
    Text,
    /// The full result list as a JSON array.
    Json,
}
