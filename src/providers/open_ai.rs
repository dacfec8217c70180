use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::providers::{build_client, check_status, ContentBlock, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Provider for OpenAI and OpenAI-compatible chat completion endpoints
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ProviderError::Setup("OPENAI_API_KEY not found in config or environment".to_string())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: build_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            max_tokens: crate::config::default_max_tokens(),
        }
    }

    fn message_content(content: &[ContentBlock]) -> Value {
        if let [ContentBlock::Text(text)] = content {
            return Value::String(text.clone());
        }

        Value::Array(
            content
                .iter()
                .map(|block| match block {
                    ContentBlock::Text(text) => json!({"type": "text", "text": text}),
                    ContentBlock::Image { media_type, data } => json!({
                        "type": "image_url",
                        "image_url": {"url": format!("data:{};base64,{}", media_type, data)}
                    }),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn send(&self, content: Vec<ContentBlock>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": Self::message_content(&content)}
                ],
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let response_body: Value = response.json().await?;
        debug!("OpenAI response: {:?}", response_body);

        if let Some(error) = response_body.get("error") {
            return Err(ProviderError::Api {
                provider: "OpenAI".to_string(),
                kind: error["type"].as_str().unwrap_or("unknown").to_string(),
                message: error["message"]
                    .as_str()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::MissingContent("OpenAI".to_string()))?
            .to_string();

        Ok(text)
    }
}
