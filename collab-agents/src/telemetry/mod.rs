//! Fault Reporting
//!
//! The observability collaborator the pipeline reports degradations to.
//! Fire-and-forget: the core never consumes a return value from a report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

/// A human-readable fault description with correlation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultReport {
    /// Report ID.
    pub id: Uuid,

    /// When the fault was observed.
    pub at: DateTime<Utc>,

    /// Which component observed it (agent name or "workflow").
    pub source: String,

    /// What happened.
    pub message: String,
}

impl FaultReport {
    /// Create a report timestamped now.
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Sink for fault reports.
///
/// Implementations decide where reports go (logs, a dashboard, a test
/// counter); the pipeline only promises to call `report` for every recovered
/// transport fault and exactly once for an aborted run.
pub trait FaultSink: Send + Sync {
    /// Accept one fault report.
    fn report(&self, fault: FaultReport);
}

/// Default sink: structured error logging via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn report(&self, fault: FaultReport) {
        error!(
            report_id = %fault.id,
            source = %fault.source,
            "{}",
            fault.message
        );
    }
}
