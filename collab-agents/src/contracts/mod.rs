//! Shared Contract Types
//!
//! The data model every other module builds on: the structured record an
//! agent guarantees to produce, the agent's identity, its conversation log,
//! and the per-stage workflow result.

pub mod common;
pub mod record;
pub mod workflow;

pub use common::AgentIdentity;
pub use record::{ConversationEntry, RecordOrigin, StructuredRecord};
pub use workflow::WorkflowResult;
