//! Common Contract Types

use serde::{Deserialize, Serialize};

/// Agent identification used to build the model-facing role description and
/// to label workflow results.
///
/// Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Display name, e.g. "Researcher"
    pub name: String,

    /// Role description embedded in the system prompt,
    /// e.g. "research and data analysis expert"
    pub role: String,
}

impl AgentIdentity {
    /// Create a new identity.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}
