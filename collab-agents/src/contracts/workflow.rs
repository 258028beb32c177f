//! Workflow Result Contract

use serde::{Deserialize, Serialize};

use super::record::StructuredRecord;

/// One stage's labeled output within a workflow run.
///
/// A successful run yields exactly three of these, in researcher, writer,
/// critic order. An aborted run yields none at all: the caller must treat an
/// empty sequence as "no results produced", not "three empty results".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Name of the agent that produced this output.
    pub agent: String,

    /// The stage's structured record.
    pub output: StructuredRecord,
}
