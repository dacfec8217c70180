mod anthropic;
mod factory;
mod open_ai;
mod prompt;
#[cfg(test)]
pub(crate) mod scripted;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{
    inject_ingredients, ANALYSIS_PROMPT, EXTRACTION_PROMPT, NO_INGREDIENTS_SENTINEL,
};

use crate::error::ProviderError;
use async_trait::async_trait;

/// One piece of a user message sent to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Plain instruction or ingredient text
    Text(String),
    /// Base64-encoded image with its media type (e.g. "image/jpeg")
    Image { media_type: String, data: String },
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "anthropic", "openai")
    fn provider_name(&self) -> &str;

    /// Send a single user message and return the generated text
    async fn send(&self, content: Vec<ContentBlock>) -> Result<String, ProviderError>;
}

/// Turn a non-success HTTP response into a `ProviderError::Status`
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Build a `reqwest::Client`, honouring an optional request timeout
pub(crate) fn build_client(
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
