//! Anthropic Messages API Client
//!
//! The external model-call primitive. One request per call, no streaming,
//! no retry or backoff: callers that need resilience get it from the agent
//! layer's fallback records, not from this client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// API version header value the Messages endpoint requires.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sampling and sizing options passed through to the model, opaque to the
/// rest of the pipeline.
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Model identifier.
    pub model: String,

    /// Response-size ceiling in tokens.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Base URL of the API.
    pub base_url: Url,

    /// API key sent in the `x-api-key` header.
    pub api_key: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Model options applied to every call.
    pub options: ModelOptions,
}

impl AnthropicConfig {
    /// Create a config with default endpoint and options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default URL"),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
            options: ModelOptions::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `ANTHROPIC_API_KEY` is required; `ANTHROPIC_BASE_URL`,
    /// `ANTHROPIC_MODEL`, `ANTHROPIC_MAX_TOKENS`, `ANTHROPIC_TEMPERATURE`,
    /// and `ANTHROPIC_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self, TransportError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            TransportError::Configuration("ANTHROPIC_API_KEY is not set".to_string())
        })?;

        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("ANTHROPIC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let options = ModelOptions {
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: std::env::var("ANTHROPIC_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            temperature: std::env::var("ANTHROPIC_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
        };

        Ok(Self {
            base_url: Url::parse(&base_url)
                .map_err(|e| TransportError::Configuration(e.to_string()))?,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            options,
        })
    }
}

/// Transport-level faults from the model call.
///
/// None of these escape an agent: the agent layer converts every variant
/// into a fault record and reports it to the fault sink.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Invalid or missing client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Could not reach the API.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// Invalid or missing credentials.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The API throttled the request.
    #[error("rate limited by the API")]
    RateLimited,

    /// Any other non-success status.
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The reply body did not have the expected shape.
    #[error("malformed API reply: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Api {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Malformed(err.to_string())
    }
}

/// The model-call seam.
///
/// `system` and `user` are the two instruction layers; `options` carry the
/// opaque sampling configuration. Implementations return the raw reply text
/// exactly as the model produced it; structuring is the caller's job.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Perform one model round trip.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: &ModelOptions,
    ) -> Result<String, TransportError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [MessageParam<'a>; 1],
}

#[derive(Serialize)]
struct MessageParam<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    /// Create a new client.
    pub fn new(config: AnthropicConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(AnthropicConfig::from_env()?)
    }

    /// The model options this client was configured with.
    pub fn options(&self) -> &ModelOptions {
        &self.config.options
    }

    fn messages_url(&self) -> Result<Url, TransportError> {
        self.config
            .base_url
            .join("/v1/messages")
            .map_err(|e| TransportError::Configuration(e.to_string()))
    }
}

#[async_trait]
impl ModelTransport for AnthropicClient {
    #[instrument(skip(self, system, user), fields(model = %options.model))]
    async fn complete(
        &self,
        system: &str,
        user: &str,
        options: &ModelOptions,
    ) -> Result<String, TransportError> {
        let url = self.messages_url()?;

        let request = MessagesRequest {
            model: &options.model,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            system,
            messages: [MessageParam {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "model call rejected");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    TransportError::Authentication("invalid or missing API key".to_string())
                }
                StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimited,
                _ => TransportError::Api {
                    status: status.as_u16(),
                    message: body,
                },
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "model reply received");

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        let block = parsed
            .content
            .into_iter()
            .next()
            .ok_or_else(|| TransportError::Malformed("reply has no content blocks".to_string()))?;

        Ok(block.text)
    }
}
