use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main scanner configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds. Unset means wait for the API indefinitely.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            timeout: None,
        }
    }
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier (e.g., "claude-sonnet-4-20250514", "gpt-4o").
    /// Left empty in a config file, the provider's default model is used.
    #[serde(default)]
    pub model: String,
    /// Maximum tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl ProviderConfig {
    /// Built-in defaults for the named provider
    pub fn for_provider(name: &str) -> Self {
        Self {
            model: default_model_for(name),
            ..Self::default()
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(default_provider(), ProviderConfig::default());
    providers
}

pub(crate) fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

/// Default model for a provider that has no entry in the config file
pub(crate) fn default_model_for(provider: &str) -> String {
    match provider {
        "openai" => "gpt-4o".to_string(),
        _ => default_model(),
    }
}

pub(crate) fn default_max_tokens() -> u32 {
    1000
}

impl ScanConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration of the named provider, falling back to its built-in defaults
    pub fn provider_config(&self, name: &str) -> ProviderConfig {
        match self.providers.get(name) {
            Some(config) if config.model.trim().is_empty() => ProviderConfig {
                model: default_model_for(name),
                ..config.clone()
            },
            Some(config) => config.clone(),
            None => ProviderConfig::for_provider(name),
        }
    }

    /// Configuration of the default provider, falling back to built-in defaults
    pub fn default_provider_config(&self) -> ProviderConfig {
        self.provider_config(&self.default_provider)
    }

    /// The request timeout, if one is configured
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with FOODSCAN__ prefix
/// 2. foodscan.toml file in current directory
/// 3. Default values
///
/// Environment variable format: FOODSCAN__PROVIDERS__ANTHROPIC__API_KEY
pub fn load_config() -> Result<ScanConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("foodscan").required(false))
        // Use double underscore for nested: FOODSCAN__PROVIDERS__ANTHROPIC__API_KEY
        .add_source(
            Environment::with_prefix("FOODSCAN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
