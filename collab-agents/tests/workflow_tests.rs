//! Integration Tests for the Collaboration Workflow
//!
//! End-to-end runs of the three-stage pipeline against a scripted transport:
//! well-formed replies, transport faults mid-pipeline, prose-wrapped JSON,
//! and aborts from outside the agents' total contract.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use collab_agents::{
    FaultReport, FaultSink, ModelOptions, ModelTransport, RecordOrigin, StagePrompts,
    TransportError, Workflow, WorkflowError, WorkflowState,
};

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// Transport that pops one scripted outcome per call and records the user
/// instruction it was given.
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<String, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn seen_inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn complete(
        &self,
        _system: &str,
        user: &str,
        _options: &ModelOptions,
    ) -> Result<String, TransportError> {
        self.inputs.lock().unwrap().push(user.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted")
    }
}

/// Sink that counts reports and keeps their messages.
#[derive(Default)]
struct CountingSink {
    count: AtomicUsize,
    messages: Mutex<Vec<String>>,
}

impl CountingSink {
    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl FaultSink for CountingSink {
    fn report(&self, fault: FaultReport) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.messages.lock().unwrap().push(fault.message);
    }
}

/// Prompt builder whose writer-stage input construction fails, simulating a
/// fault outside any agent's contract.
struct FailingWritePrompts;

impl StagePrompts for FailingWritePrompts {
    fn research(&self, task: &str) -> Result<String, WorkflowError> {
        Ok(format!("Analyze this topic and provide key points: {task}"))
    }

    fn write(&self, _task: &str, _research: &str) -> Result<String, WorkflowError> {
        Err(WorkflowError::StageInput {
            stage: "write",
            reason: "template rendering failed".to_string(),
        })
    }

    fn critique(&self, _task: &str, draft: &str) -> Result<String, WorkflowError> {
        Ok(draft.to_string())
    }
}

fn json_reply(thoughts: &str, response: &str) -> Result<String, TransportError> {
    Ok(format!(
        "{{\"thoughts\": \"{thoughts}\", \"response\": \"{response}\"}}"
    ))
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[tokio::test]
async fn test_three_well_formed_stages_in_order() {
    let transport = ScriptedTransport::new(vec![
        json_reply("analyzing", "key points about rainbows"),
        json_reply("drafting", "a structured explanation of rainbows"),
        json_reply("reviewing", "clear draft, tighten the intro"),
    ]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport.clone(), sink.clone(), ModelOptions::default());

    let results = workflow.run_workflow("explain rainbows").await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].agent, "Researcher");
    assert_eq!(results[1].agent, "Writer");
    assert_eq!(results[2].agent, "Critic");
    for result in &results {
        assert!(!result.output.response.is_empty());
        assert_eq!(result.output.origin, RecordOrigin::Parsed);
    }
    assert_eq!(workflow.state(), WorkflowState::Done);
    assert_eq!(sink.count(), 0);

    // Stage inputs chain: writer sees the research response, critic sees
    // the draft.
    let inputs = transport.seen_inputs();
    assert_eq!(inputs.len(), 3);
    assert!(inputs[0].contains("explain rainbows"));
    assert!(inputs[1].contains("key points about rainbows"));
    assert!(inputs[2].contains("a structured explanation of rainbows"));
}

#[tokio::test]
async fn test_researcher_transport_fault_keeps_pipeline_moving() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError::Timeout),
        json_reply("drafting", "working from the error description"),
        json_reply("reviewing", "draft acknowledges missing research"),
    ]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport.clone(), sink.clone(), ModelOptions::default());

    let results = workflow.run_workflow("explain tides").await;

    // All three stages still produce results.
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].output.origin, RecordOrigin::TransportFault);
    assert!(results[0].output.response.contains("I encountered an error"));
    assert_eq!(results[1].output.origin, RecordOrigin::Parsed);
    assert_eq!(results[2].output.origin, RecordOrigin::Parsed);
    assert_eq!(workflow.state(), WorkflowState::Done);

    // The writer was fed the researcher's error text as its input.
    let inputs = transport.seen_inputs();
    assert!(inputs[1].contains("I encountered an error"));

    // One report: the recovered transport fault. No abort report.
    assert_eq!(sink.count(), 1);
    assert!(sink.messages.lock().unwrap()[0].contains("model call failed"));
}

#[tokio::test]
async fn test_prose_wrapped_reply_is_isolated_mid_pipeline() {
    let transport = ScriptedTransport::new(vec![
        json_reply("analyzing", "points"),
        Ok("Sure! {\"thoughts\":\"x\",\"response\":\"y\"} Hope that helps!".to_string()),
        json_reply("reviewing", "fine"),
    ]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport, sink, ModelOptions::default());

    let results = workflow.run_workflow("task").await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[1].output.thoughts, "x");
    assert_eq!(results[1].output.response, "y");
    assert_eq!(results[1].output.origin, RecordOrigin::Parsed);
}

#[tokio::test]
async fn test_stage_input_fault_aborts_with_empty_results() {
    let transport = ScriptedTransport::new(vec![json_reply("analyzing", "points")]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport.clone(), sink.clone(), ModelOptions::default())
        .with_prompts(Box::new(FailingWritePrompts));

    let results = workflow.run_workflow("task").await;

    // Empty sequence means "no results produced", not "three empty results".
    assert!(results.is_empty());
    assert_eq!(workflow.state(), WorkflowState::Aborted);

    // The researcher ran before the abort; the writer and critic never did.
    assert_eq!(transport.seen_inputs().len(), 1);

    // The fault was reported exactly once.
    assert_eq!(sink.count(), 1);
    assert!(sink.messages.lock().unwrap()[0].contains("workflow aborted"));
}

#[tokio::test]
async fn test_unparseable_reply_degrades_without_derailing() {
    let transport = ScriptedTransport::new(vec![
        Ok("no json at all, just rambling".to_string()),
        json_reply("drafting", "draft built from raw rambling"),
        json_reply("reviewing", "ok"),
    ]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport.clone(), sink.clone(), ModelOptions::default());

    let results = workflow.run_workflow("task").await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].output.origin, RecordOrigin::Synthesized);
    assert_eq!(results[0].output.response, "no json at all, just rambling");
    // Malformed output is not a fault, only a degradation.
    assert_eq!(sink.count(), 0);

    // The raw text still flowed into the writer's input.
    assert!(transport.seen_inputs()[1].contains("just rambling"));
}

#[tokio::test]
async fn test_agent_histories_are_run_scoped_and_ordered() {
    let transport = ScriptedTransport::new(vec![
        json_reply("a", "research out"),
        json_reply("b", "writer out"),
        json_reply("c", "critic out"),
    ]);
    let sink = Arc::new(CountingSink::default());
    let mut workflow = Workflow::new(transport, sink, ModelOptions::default());

    workflow.run_workflow("task").await;

    assert_eq!(workflow.researcher().history().len(), 1);
    assert_eq!(workflow.writer().history().len(), 1);
    assert_eq!(workflow.critic().history().len(), 1);
    assert_eq!(workflow.researcher().history()[0].speaker, "Researcher");
    assert_eq!(workflow.researcher().history()[0].content, "research out");
    assert_eq!(workflow.critic().history()[0].content, "critic out");
}
