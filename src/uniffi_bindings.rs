//! UniFFI bindings for foodscan
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::{AnalysisResult, Finding, IngredientScanner, IngredientScannerBuilder, ScanError};

/// FFI-compatible finding (one ingredient and why it was categorized that way)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFinding {
    pub name: String,
    pub explanation: String,
}

impl From<Finding> for FfiFinding {
    fn from(finding: Finding) -> Self {
        FfiFinding {
            name: finding.name,
            explanation: finding.explanation,
        }
    }
}

/// FFI-compatible analysis result
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiAnalysisResult {
    pub safe_ingredients: Vec<FfiFinding>,
    pub concerns: Vec<FfiFinding>,
    pub summary: String,
    /// Note on anything the model was unsure about (None if there is none)
    pub uncertainty_note: Option<String>,
}

impl From<AnalysisResult> for FfiAnalysisResult {
    fn from(result: AnalysisResult) -> Self {
        FfiAnalysisResult {
            safe_ingredients: result.safe_ingredients.into_iter().map(Into::into).collect(),
            concerns: result.concerns.into_iter().map(Into::into).collect(),
            summary: result.summary,
            uncertainty_note: result.uncertainty_note,
        }
    }
}

/// FFI-compatible LLM provider enum
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiProvider {
    Anthropic,
    OpenAI,
}

impl From<FfiProvider> for crate::Provider {
    fn from(provider: FfiProvider) -> Self {
        match provider {
            FfiProvider::Anthropic => crate::Provider::Anthropic,
            FfiProvider::OpenAI => crate::Provider::OpenAI,
        }
    }
}

/// FFI-compatible error type.
///
/// Every variant carries the banner message to show the user.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiScanError {
    /// The extraction request failed
    ExtractionFailed { message: String },
    /// No ingredient list was visible in the image
    NoIngredientsFound { message: String },
    /// The analysis request failed or its reply was not valid JSON
    AnalysisFailed { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Builder or configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiScanError::ExtractionFailed { message }
            | FfiScanError::NoIngredientsFound { message }
            | FfiScanError::AnalysisFailed { message }
            | FfiScanError::InvalidInput { message } => write!(f, "{}", message),
            FfiScanError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiScanError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiScanError {}

impl From<ScanError> for FfiScanError {
    fn from(err: ScanError) -> Self {
        let message = err.user_message();
        match err {
            ScanError::Extraction(_) => FfiScanError::ExtractionFailed { message },
            ScanError::NoIngredientsFound => FfiScanError::NoIngredientsFound { message },
            ScanError::Analysis(_) => FfiScanError::AnalysisFailed { message },
            ScanError::InvalidInput(_) => FfiScanError::InvalidInput { message },
            ScanError::Builder(_) | ScanError::Config(_) => FfiScanError::ConfigError { message },
        }
    }
}

/// Configuration for a scan
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiScanConfig {
    /// Optional LLM provider (uses default if not specified)
    pub provider: Option<FfiProvider>,
    /// Optional API key (uses environment variable if not specified)
    pub api_key: Option<String>,
    /// Optional model name (uses provider default if not specified)
    pub model: Option<String>,
    /// Optional timeout in seconds (no timeout if not specified)
    pub timeout_seconds: Option<u64>,
}

impl FfiScanConfig {
    fn apply(self, mut builder: IngredientScannerBuilder) -> IngredientScannerBuilder {
        if let Some(provider) = self.provider {
            builder = builder.provider(provider.into());
        }
        if let Some(api_key) = self.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        if let Some(timeout_secs) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        builder
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiScanError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiScanError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn run(builder: IngredientScannerBuilder) -> Result<FfiAnalysisResult, FfiScanError> {
    let rt = create_runtime()?;
    let result = rt.block_on(builder.build())?;
    Ok(result.into())
}

/// Scan a label image file
///
/// # Arguments
/// * `image_path` - Path to a jpg, png, gif or webp image
/// * `config` - Optional configuration for the scan
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn scan_image(
    image_path: String,
    config: Option<FfiScanConfig>,
) -> Result<FfiAnalysisResult, FfiScanError> {
    let builder = IngredientScanner::builder().image(image_path);
    run(config.unwrap_or_default().apply(builder))
}

/// Scan a label image captured by the host app
///
/// # Arguments
/// * `data` - Base64-encoded image bytes
/// * `media_type` - Media type such as "image/jpeg"
/// * `config` - Optional configuration for the scan
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn scan_image_base64(
    data: String,
    media_type: String,
    config: Option<FfiScanConfig>,
) -> Result<FfiAnalysisResult, FfiScanError> {
    let builder = IngredientScanner::builder().image_base64(data, media_type);
    run(config.unwrap_or_default().apply(builder))
}

/// Analyze an ingredient list typed or pasted by the user
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn analyze_text(
    text: String,
    config: Option<FfiScanConfig>,
) -> Result<FfiAnalysisResult, FfiScanError> {
    let builder = IngredientScanner::builder().text(text);
    run(config.unwrap_or_default().apply(builder))
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if a provider is available (has required environment variables)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn is_provider_available(provider: FfiProvider) -> bool {
    match provider {
        FfiProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").is_ok(),
        FfiProvider::OpenAI => std::env::var("OPENAI_API_KEY").is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_result_conversion() {
        let result = AnalysisResult {
            safe_ingredients: vec![Finding::new("Water", "basic ingredient")],
            concerns: vec![Finding::new("Red 40", "artificial dye")],
            summary: "Mostly fine.".to_string(),
            uncertainty_note: Some("Flavorings unclear.".to_string()),
        };

        let ffi: FfiAnalysisResult = result.into();
        assert_eq!(ffi.safe_ingredients.len(), 1);
        assert_eq!(ffi.safe_ingredients[0].name, "Water");
        assert_eq!(ffi.concerns[0].explanation, "artificial dye");
        assert_eq!(ffi.summary, "Mostly fine.");
        assert_eq!(ffi.uncertainty_note.as_deref(), Some("Flavorings unclear."));
    }

    #[test]
    fn test_ffi_error_carries_banner_message() {
        let err: FfiScanError = ScanError::NoIngredientsFound.into();
        match &err {
            FfiScanError::NoIngredientsFound { message } => {
                assert!(message.contains("clearer photo"))
            }
            other => panic!("unexpected variant: {:?}", other),
        }

        let err: FfiScanError = ScanError::Analysis("bad json".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Failed to analyze ingredients. Please try again."
        );
    }

    #[test]
    fn test_analyze_blank_text_is_rejected() {
        let result = analyze_text("  ".to_string(), None);
        assert!(matches!(result, Err(FfiScanError::InvalidInput { .. })));
    }

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
