//! Workflow Orchestrator
//!
//! Drives the fixed research → write → critique pipeline. The three agents
//! are named fields, not a dynamic collection: the pipeline shape is a
//! structural invariant.
//!
//! # Failure Semantics
//!
//! Agents are total, so the orchestrator never sees an error from a stage
//! itself. The only faults that can escape are those raised outside the
//! agents' contract, stage-input construction in practice; any such fault
//! aborts the run, is reported exactly once to the fault sink, and yields an
//! empty result list. Callers must read an empty list as "no results
//! produced", never as "three empty results".

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::agents::Agent;
use crate::clients::{ModelOptions, ModelTransport};
use crate::contracts::WorkflowResult;
use crate::telemetry::{FaultReport, FaultSink};

/// Orchestrator states. `Aborted` is reachable from every other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// No run in progress.
    Start,
    /// The researcher stage is in flight.
    Researching,
    /// The writer stage is in flight.
    Writing,
    /// The critic stage is in flight.
    Critiquing,
    /// The last run completed with three results.
    Done,
    /// The last run aborted; no results were produced.
    Aborted,
}

/// Faults that abort a workflow run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Stage-input construction failed.
    #[error("failed to build input for the {stage} stage: {reason}")]
    StageInput {
        /// Which stage's input could not be built.
        stage: &'static str,
        /// Why.
        reason: String,
    },
}

/// Stage-input construction seam.
///
/// Each method builds one stage's input from the task description and the
/// previous stage's response text. The default implementation is
/// infallible; the seam exists so the abort path stays honest and testable.
pub trait StagePrompts: Send + Sync {
    /// Input for the researcher stage.
    fn research(&self, task: &str) -> Result<String, WorkflowError>;

    /// Input for the writer stage.
    fn write(&self, task: &str, research: &str) -> Result<String, WorkflowError>;

    /// Input for the critic stage.
    fn critique(&self, task: &str, draft: &str) -> Result<String, WorkflowError>;
}

/// Standard stage-input wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompts;

impl StagePrompts for DefaultPrompts {
    fn research(&self, task: &str) -> Result<String, WorkflowError> {
        Ok(format!("Analyze this topic and provide key points: {task}"))
    }

    fn write(&self, task: &str, research: &str) -> Result<String, WorkflowError> {
        Ok(format!(
            "Using these research points: {research}\n\
             Create a well-structured explanation of: {task}"
        ))
    }

    fn critique(&self, task: &str, draft: &str) -> Result<String, WorkflowError> {
        Ok(format!(
            "Review this explanation of {task}:\n{draft}\n\
             Provide specific feedback and suggestions."
        ))
    }
}

/// The three-stage pipeline.
///
/// Owns its agents (composition, fixed roles). Stages run strictly
/// sequentially: each stage's input is derived from the previous stage's
/// output, so there is nothing to parallelize. Construct a fresh `Workflow`
/// per run to keep conversation histories run-scoped.
pub struct Workflow {
    researcher: Agent,
    writer: Agent,
    critic: Agent,
    prompts: Box<dyn StagePrompts>,
    faults: Arc<dyn FaultSink>,
    state: WorkflowState,
}

impl Workflow {
    /// Build a workflow with fresh researcher, writer, and critic agents
    /// sharing one transport and fault sink.
    pub fn new(
        transport: Arc<dyn ModelTransport>,
        faults: Arc<dyn FaultSink>,
        options: ModelOptions,
    ) -> Self {
        Self {
            researcher: Agent::researcher(transport.clone(), faults.clone(), options.clone()),
            writer: Agent::writer(transport.clone(), faults.clone(), options.clone()),
            critic: Agent::critic(transport, faults.clone(), options),
            prompts: Box::new(DefaultPrompts),
            faults,
            state: WorkflowState::Start,
        }
    }

    /// Replace the stage-input builder.
    pub fn with_prompts(mut self, prompts: Box<dyn StagePrompts>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Current orchestrator state.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// The researcher agent.
    pub fn researcher(&self) -> &Agent {
        &self.researcher
    }

    /// The writer agent.
    pub fn writer(&self) -> &Agent {
        &self.writer
    }

    /// The critic agent.
    pub fn critic(&self) -> &Agent {
        &self.critic
    }

    /// Run the full pipeline for one task.
    ///
    /// Returns three results in researcher, writer, critic order, or an
    /// empty list if the run aborted. Never fails.
    #[instrument(skip(self, task))]
    pub async fn run_workflow(&mut self, task: &str) -> Vec<WorkflowResult> {
        self.state = WorkflowState::Start;

        match self.try_run(task).await {
            Ok(results) => {
                self.state = WorkflowState::Done;
                info!(results = results.len(), "workflow completed");
                results
            }
            Err(err) => {
                self.state = WorkflowState::Aborted;
                error!(error = %err, "workflow aborted");
                self.faults
                    .report(FaultReport::new("workflow", format!("workflow aborted: {err}")));
                Vec::new()
            }
        }
    }

    async fn try_run(&mut self, task: &str) -> Result<Vec<WorkflowResult>, WorkflowError> {
        let mut results = Vec::with_capacity(3);

        self.state = WorkflowState::Researching;
        info!(stage = "research", "researcher agent is analyzing the task");
        let input = self.prompts.research(task)?;
        let research = self.researcher.process(&input).await;
        results.push(WorkflowResult {
            agent: self.researcher.name().to_string(),
            output: research.clone(),
        });

        self.state = WorkflowState::Writing;
        info!(stage = "write", "writer agent is creating content");
        let input = self.prompts.write(task, &research.response)?;
        let draft = self.writer.process(&input).await;
        results.push(WorkflowResult {
            agent: self.writer.name().to_string(),
            output: draft.clone(),
        });

        self.state = WorkflowState::Critiquing;
        info!(stage = "critique", "critic agent is reviewing the content");
        let input = self.prompts.critique(task, &draft.response)?;
        let critique = self.critic.process(&input).await;
        results.push(WorkflowResult {
            agent: self.critic.name().to_string(),
            output: critique,
        });

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_embed_inputs() {
        let prompts = DefaultPrompts;
        let research = prompts.research("the water cycle").unwrap();
        assert!(research.starts_with("Analyze this topic"));
        assert!(research.contains("the water cycle"));

        let write = prompts.write("the water cycle", "key points here").unwrap();
        assert!(write.contains("key points here"));
        assert!(write.contains("the water cycle"));

        let critique = prompts.critique("the water cycle", "draft text").unwrap();
        assert!(critique.contains("draft text"));
    }
}
