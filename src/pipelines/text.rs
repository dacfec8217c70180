use crate::error::ScanError;
use crate::model::AnalysisResult;
use crate::providers::{inject_ingredients, ContentBlock, LlmProvider};
use log::{debug, info, warn};
use serde_json::Value;

/// Run the structured safety analysis on an ingredient list.
///
/// Both request failures and unparseable replies collapse into
/// `ScanError::Analysis`.
pub async fn analyze(
    provider: &dyn LlmProvider,
    ingredients: &str,
) -> Result<AnalysisResult, ScanError> {
    info!(
        "Analyzing {} characters of ingredient text with {}",
        ingredients.len(),
        provider.provider_name()
    );

    let reply = provider
        .send(vec![ContentBlock::Text(inject_ingredients(ingredients))])
        .await
        .map_err(|e| {
            warn!("Analysis request failed: {}", e);
            ScanError::Analysis(e.to_string())
        })?;

    parse_analysis(&reply)
}

/// Strip code fences from the reply and parse it as an `AnalysisResult`
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, ScanError> {
    let cleaned = strip_code_fences(reply);
    debug!("Parsing analysis reply: {}", cleaned);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        warn!("Analysis reply is not valid JSON: {}", e);
        ScanError::Analysis(format!("invalid JSON: {}", e))
    })?;

    AnalysisResult::from_json(&value).ok_or_else(|| {
        warn!("Analysis reply is JSON but not an object");
        ScanError::Analysis("expected a JSON object".to_string())
    })
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker, then trim.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}
