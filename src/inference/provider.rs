use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during provider operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response, or it contained no text.
    /// Not retryable.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// The text-generation collaborator.
///
/// A single opaque request/response: one prompt in, one completed response
/// out. No streaming, no retries, no cancellation; the conversation
/// controller owns every state transition around the outcome.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
