//! Scan a food ingredient label and get a plain-language safety breakdown.
//!
//! A label photo is sent to an LLM that transcribes the ingredient list; the
//! list (or text the user typed) is then sent back for a categorized
//! analysis: ingredients that are fine, ingredients to watch out for, a short
//! summary and an optional note on anything unclear.

pub mod builder;
pub mod config;
pub mod error;
pub mod images_to_text;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod render;
pub mod screen;
pub mod uniffi_bindings;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

pub use builder::{IngredientScanner, IngredientScannerBuilder, InputSource, Provider};
pub use self::config::{ProviderConfig, ScanConfig};
pub use error::{ProviderError, ScanError};
pub use images_to_text::{ImagePayload, ImageSource};
pub use model::{AnalysisResult, Finding};
pub use screen::{Mode, ScanScreen};

use crate::providers::ProviderFactory;

/// Scan a label image file with the default provider
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), foodscan::ScanError> {
/// let result = foodscan::scan_image("label.jpg").await?;
/// for concern in &result.concerns {
///     println!("{}", concern);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn scan_image(path: &str) -> Result<AnalysisResult, ScanError> {
    IngredientScanner::builder().image(path).build().await
}

/// Analyze an ingredient list with the default provider
pub async fn analyze_text(text: &str) -> Result<AnalysisResult, ScanError> {
    IngredientScanner::builder().text(text).build().await
}

/// Only run the extraction step on a label image and return the raw ingredient text
pub async fn extract_ingredients(path: &str) -> Result<String, ScanError> {
    let config = ScanConfig::load()?;
    let provider = ProviderFactory::get_default_provider(&config)
        .map_err(|e| ScanError::Builder(e.to_string()))?;

    let payload = images_to_text::load(&ImageSource::Path(path.to_string())).await?;
    images_to_text::extract(provider.as_ref(), &payload).await
}
