//! External Service Clients
//!
//! The model-call primitive lives here: the [`ModelTransport`] seam every
//! agent calls through, and the [`AnthropicClient`] implementation of it.

pub mod anthropic;

pub use anthropic::{
    AnthropicClient, AnthropicConfig, ModelOptions, ModelTransport, TransportError,
};
