//! Agent Collaboration Pipeline
//!
//! This crate implements a fixed three-stage multi-agent workflow on top of a
//! hosted LLM API. Each stage is a role-scoped agent (researcher, writer,
//! critic) that turns one raw model exchange into a [`StructuredRecord`] with
//! `thoughts` and `response` fields.
//!
//! # Core Guarantee
//!
//! An agent call NEVER fails. The model may return malformed JSON, JSON
//! wrapped in prose, control-character noise, or the transport may fault
//! outright; in every case [`Agent::process`] returns a fully populated
//! record. Degradation is visible only in the record's content and its
//! [`RecordOrigin`] tag, never as an error at the call site.
//!
//! The recovery layers, innermost first:
//!
//! - [`response::sanitize`]: normalizes arbitrary text into a form a strict
//!   JSON parser accepts.
//! - [`response::extract`]: isolates a JSON object span, parses it, and
//!   synthesizes a fallback record when parsing fails.
//! - [`Agent::process`]: converts transport faults into fault records and
//!   reports them to the [`FaultSink`] collaborator.
//! - [`Workflow::run_workflow`]: aborts on any fault escaping the layers
//!   above, reports it once, and returns an empty result list.
//!
//! # Pipeline Shape
//!
//! The pipeline is a structural invariant, not configuration: research →
//! write → critique, each stage's input built from the previous stage's
//! `response`. Stages run strictly sequentially.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use collab_agents::{AnthropicClient, AnthropicConfig, TracingFaultSink, Workflow};
//!
//! let config = AnthropicConfig::from_env()?;
//! let options = config.options.clone();
//! let client = Arc::new(AnthropicClient::new(config)?);
//! let mut workflow = Workflow::new(client, Arc::new(TracingFaultSink), options);
//!
//! let results = workflow.run_workflow("Explain the theory of relativity").await;
//! for result in &results {
//!     println!("{}: {}", result.agent, result.output.response);
//! }
//! ```
//!
//! # Modules
//!
//! - [`contracts`]: Shared data model (records, identities, results)
//! - [`response`]: Sanitizer and structured-response extractor
//! - [`clients`]: Model-call transport (Anthropic Messages API)
//! - [`agents`]: Role-scoped agent implementation
//! - [`workflow`]: Three-stage orchestrator
//! - [`telemetry`]: Fault-reporting collaborator

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod agents;
pub mod clients;
pub mod contracts;
pub mod response;
pub mod telemetry;
pub mod workflow;

// Re-export commonly used types
pub use agents::Agent;
pub use clients::{
    AnthropicClient, AnthropicConfig, ModelOptions, ModelTransport, TransportError,
};
pub use contracts::{AgentIdentity, ConversationEntry, RecordOrigin, StructuredRecord, WorkflowResult};
pub use response::{extract, sanitize};
pub use telemetry::{FaultReport, FaultSink, TracingFaultSink};
pub use workflow::{DefaultPrompts, StagePrompts, Workflow, WorkflowError, WorkflowState};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
