use std::sync::Arc;
use std::time::Duration;

use crate::config::ScanConfig;
use crate::images_to_text::ImageSource;
use crate::pipelines;
use crate::providers::{LlmProvider, ProviderFactory};
use crate::screen::ScanScreen;
use crate::{AnalysisResult, ScanError};

/// Represents the input to scan
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Ingredient list typed or pasted by the user
    Text(String),
    /// Label image (file path or base64 payload)
    Image(ImageSource),
}

/// LLM provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAI => "openai",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            other => Err(ScanError::Builder(format!("Unknown provider: {}", other))),
        }
    }
}

/// Builder for configuring and running an ingredient scan
#[derive(Debug, Default)]
pub struct IngredientScannerBuilder {
    source: Option<InputSource>,
    provider: Option<Provider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    config: Option<ScanConfig>,
}

impl IngredientScannerBuilder {
    /// Scan a label image file
    ///
    /// # Example
    /// ```
    /// use foodscan::IngredientScanner;
    ///
    /// let builder = IngredientScanner::builder()
    ///     .image("/path/to/label.jpg");
    /// ```
    pub fn image(mut self, image_path: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Path(image_path.into())));
        self
    }

    /// Scan a base64-encoded label image, e.g. straight from a camera capture
    pub fn image_base64(mut self, data: impl Into<String>, media_type: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Base64 {
            data: data.into(),
            media_type: media_type.into(),
        }));
        self
    }

    /// Analyze an ingredient list that is already text
    ///
    /// # Example
    /// ```
    /// use foodscan::IngredientScanner;
    ///
    /// let builder = IngredientScanner::builder()
    ///     .text("Water, Sugar, Wheat Flour, Palm Oil, Salt");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the LLM provider
    ///
    /// # Example
    /// ```
    /// use foodscan::{IngredientScanner, Provider};
    ///
    /// let builder = IngredientScanner::builder()
    ///     .text("Water, Salt")
    ///     .provider(Provider::OpenAI);
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for each HTTP request. Without one, requests wait indefinitely.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key instead of relying on environment variables or config files
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxy, gateway, test server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Start from an explicit configuration instead of loading `foodscan.toml`
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Create the configured provider without running anything
    pub fn build_provider(&self) -> Result<Box<dyn LlmProvider>, ScanError> {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => ScanConfig::load()?,
        };

        let name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = config.provider_config(&name);
        if let Some(key) = &self.api_key {
            provider_config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            provider_config.model = model.clone();
        }
        if let Some(url) = &self.base_url {
            provider_config.base_url = Some(url.clone());
        }

        let timeout = self.timeout.or_else(|| config.timeout_duration());

        ProviderFactory::create(&name, &provider_config, timeout)
            .map_err(|e| ScanError::Builder(e.to_string()))
    }

    /// A scanner screen wired to the configured provider
    pub fn into_screen(self) -> Result<ScanScreen, ScanError> {
        let provider: Arc<dyn LlmProvider> = Arc::from(self.build_provider()?);
        Ok(ScanScreen::new(provider))
    }

    /// Build and run the scan
    ///
    /// # Errors
    /// Returns `ScanError` if:
    /// - No input source was specified, or the text is blank
    /// - The provider cannot be configured
    /// - Extraction or analysis fails
    ///
    /// # Example
    /// ```no_run
    /// # use foodscan::IngredientScanner;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = IngredientScanner::builder()
    ///     .image("label.jpg")
    ///     .build()
    ///     .await?;
    /// println!("{}", result.summary);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<AnalysisResult, ScanError> {
        let source = self.source.clone().ok_or_else(|| {
            ScanError::Builder("No input source specified. Use .image() or .text()".to_string())
        })?;

        if let InputSource::Text(text) = &source {
            if text.trim().is_empty() {
                return Err(ScanError::InvalidInput(
                    "Ingredient text cannot be empty".to_string(),
                ));
            }
        }

        let provider = self.build_provider()?;

        match source {
            InputSource::Text(text) => pipelines::text::analyze(provider.as_ref(), &text).await,
            InputSource::Image(image) => pipelines::image::process(provider.as_ref(), &image).await,
        }
    }
}

/// Main entry point for the builder API
pub struct IngredientScanner;

impl IngredientScanner {
    /// Creates a new builder for scanning ingredients
    ///
    /// # Example
    /// ```
    /// use foodscan::IngredientScanner;
    ///
    /// let builder = IngredientScanner::builder();
    /// ```
    pub fn builder() -> IngredientScannerBuilder {
        IngredientScannerBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert!("ollama".parse::<Provider>().is_err());
    }

    #[test]
    fn test_build_provider_applies_overrides() {
        let provider = IngredientScanner::builder()
            .config(ScanConfig::default())
            .provider(Provider::OpenAI)
            .api_key("sk-test")
            .build_provider()
            .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[tokio::test]
    async fn test_build_without_source() {
        let err = IngredientScanner::builder().build().await.unwrap_err();
        assert!(matches!(err, ScanError::Builder(_)));
    }

    #[tokio::test]
    async fn test_build_rejects_blank_text() {
        let err = IngredientScanner::builder()
            .config(ScanConfig::default())
            .api_key("test-key")
            .text("   ")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }
}
