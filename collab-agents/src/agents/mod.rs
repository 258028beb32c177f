//! Role-Scoped Agents
//!
//! An [`Agent`] is a named, role-scoped wrapper around one external model
//! call plus the response-structuring logic in [`crate::response`].
//!
//! # Totality
//!
//! [`Agent::process`] never fails. Malformed model output is recovered by
//! the extractor; transport faults are reported to the fault sink and
//! converted into a fault record whose `response` describes the problem in
//! user-facing language. The orchestrator's call sites are therefore total.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::clients::{ModelOptions, ModelTransport};
use crate::contracts::{AgentIdentity, ConversationEntry, RecordOrigin, StructuredRecord};
use crate::response::{extract, sanitize};
use crate::telemetry::{FaultReport, FaultSink};

/// A named, role-scoped wrapper around the model-call primitive.
///
/// Each agent owns its conversation history exclusively; history lives as
/// long as the agent instance and is never persisted. Construct fresh
/// agents per workflow run and no synchronization is needed.
pub struct Agent {
    identity: AgentIdentity,
    transport: Arc<dyn ModelTransport>,
    faults: Arc<dyn FaultSink>,
    options: ModelOptions,
    history: Vec<ConversationEntry>,
}

impl Agent {
    /// Create an agent with the given identity.
    pub fn new(
        identity: AgentIdentity,
        transport: Arc<dyn ModelTransport>,
        faults: Arc<dyn FaultSink>,
        options: ModelOptions,
    ) -> Self {
        Self {
            identity,
            transport,
            faults,
            options,
            history: Vec::new(),
        }
    }

    /// The research and data analysis agent.
    pub fn researcher(
        transport: Arc<dyn ModelTransport>,
        faults: Arc<dyn FaultSink>,
        options: ModelOptions,
    ) -> Self {
        Self::new(
            AgentIdentity::new("Researcher", "research and data analysis expert"),
            transport,
            faults,
            options,
        )
    }

    /// The content creation agent.
    pub fn writer(
        transport: Arc<dyn ModelTransport>,
        faults: Arc<dyn FaultSink>,
        options: ModelOptions,
    ) -> Self {
        Self::new(
            AgentIdentity::new("Writer", "content creation expert"),
            transport,
            faults,
            options,
        )
    }

    /// The quality control agent.
    pub fn critic(
        transport: Arc<dyn ModelTransport>,
        faults: Arc<dyn FaultSink>,
        options: ModelOptions,
    ) -> Self {
        Self::new(
            AgentIdentity::new("Critic", "quality control expert"),
            transport,
            faults,
            options,
        )
    }

    /// The agent's identity.
    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    /// The agent's name.
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// The agent's ordered conversation history, oldest first.
    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    /// Role-scoped system prompt: identity, collaboration framing, and the
    /// strict two-key JSON output requirement.
    fn system_prompt(&self) -> String {
        format!(
            "You are {}, a {}. \
             Work collaboratively with other agents to solve tasks. \
             Your response must be only a valid JSON string in this exact format, \
             with no additional text or formatting: \
             {{\"thoughts\": \"your analytical process\", \"response\": \"your actual response\"}} \
             Keep all newlines and special characters properly escaped in your JSON.",
            self.identity.name, self.identity.role
        )
    }

    /// User-level instruction embedding the stage input and a reminder of
    /// the required output shape.
    fn user_prompt(input: &str) -> String {
        format!(
            "Task input: {input}\n\n\
             Provide your response as a single JSON object with 'thoughts' and \
             'response' fields only. No other text or formatting."
        )
    }

    /// Process one input through the model. Never fails.
    ///
    /// A transport fault is reported to the fault sink and recovered into a
    /// record describing the problem; a malformed reply is recovered by the
    /// extractor. Either way the exchange is appended to this agent's
    /// history and a fully populated record is returned.
    #[instrument(skip(self, input), fields(agent = %self.identity.name))]
    pub async fn process(&mut self, input: &str) -> StructuredRecord {
        let system = self.system_prompt();
        let user = Self::user_prompt(input);

        let record = match self.transport.complete(&system, &user, &self.options).await {
            Ok(raw) => {
                let record = extract(&raw);
                info!(origin = ?record.origin, "reply structured");
                record
            }
            Err(err) => {
                warn!(error = %err, "model call failed; returning fault record");
                self.faults.report(FaultReport::new(
                    self.identity.name.clone(),
                    format!("model call failed: {err}"),
                ));
                Self::fault_record(&err.to_string())
            }
        };

        self.history.push(ConversationEntry {
            speaker: self.identity.name.clone(),
            content: record.response.clone(),
        });

        record
    }

    /// Build the record returned when the model call itself faults.
    fn fault_record(fault: &str) -> StructuredRecord {
        StructuredRecord {
            thoughts: "Error occurred during processing".to_string(),
            response: sanitize(&format!(
                "I encountered an error while processing the input: {fault}. \
                 Please try rephrasing your request."
            )),
            origin: RecordOrigin::TransportFault,
        }
    }
}
