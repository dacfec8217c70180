use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::providers::{build_client, check_status, ContentBlock, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                ProviderError::Setup(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicProvider {
            client: build_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            max_tokens: crate::config::default_max_tokens(),
        }
    }

    /// Message content in the Messages API shape.
    ///
    /// A lone text block goes out as a plain string.
    fn message_content(content: &[ContentBlock]) -> Value {
        if let [ContentBlock::Text(text)] = content {
            return Value::String(text.clone());
        }

        Value::Array(
            content
                .iter()
                .map(|block| match block {
                    ContentBlock::Text(text) => json!({
                        "type": "text",
                        "text": text
                    }),
                    ContentBlock::Image { media_type, data } => json!({
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": media_type,
                            "data": data
                        }
                    }),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn send(&self, content: Vec<ContentBlock>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": Self::message_content(&content)
                    }
                ]
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let response_body: Value = response.json().await?;
        debug!("Anthropic response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            return Err(ProviderError::Api {
                provider: "Anthropic".to_string(),
                kind: error["type"].as_str().unwrap_or("unknown").to_string(),
                message: error["message"]
                    .as_str()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| ProviderError::MissingContent("Anthropic".to_string()))?
            .to_string();

        Ok(text)
    }
}
