//! Structured Record Contract
//!
//! The canonical unit produced by an agent call. The invariant that matters:
//! both `thoughts` and `response` exist and are sanitized text after every
//! call, regardless of what the underlying model returned. A record is never
//! partially formed.

use serde::{Deserialize, Serialize};

/// How a [`StructuredRecord`] came to be.
///
/// Callers never branch on success/failure of an agent call; if they care at
/// all, they branch on this tag. All three variants carry the same two text
/// fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// The model reply parsed as a strict JSON object with the expected keys.
    #[default]
    Parsed,

    /// Strict parsing failed; the record was synthesized from the raw reply.
    Synthesized,

    /// The model call itself faulted; the record describes the fault.
    TransportFault,
}

/// The `{thoughts, response}` pair every agent call guarantees to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// The agent's stated rationale. Always present, sanitized, never null.
    pub thoughts: String,

    /// The agent's substantive output. Always present, sanitized, never null.
    pub response: String,

    /// Outcome tag recording which recovery layer produced this record.
    #[serde(default)]
    pub origin: RecordOrigin,
}

/// One entry in an agent's ordered conversation history.
///
/// Append-only and chronological; owned exclusively by the agent instance
/// that produced it and scoped to that instance's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Name of the agent that spoke.
    pub speaker: String,

    /// The `response` text the agent produced for this exchange.
    pub content: String,
}
