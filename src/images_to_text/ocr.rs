use super::ImagePayload;
use crate::error::ScanError;
use crate::providers::{ContentBlock, LlmProvider, EXTRACTION_PROMPT, NO_INGREDIENTS_SENTINEL};
use log::{debug, info, warn};

/// Asks the model to read the ingredient list off a label image
///
/// # Arguments
/// * `provider` - The LLM provider to send the image to
/// * `image` - The validated image payload
///
/// # Returns
/// The raw ingredient text as the model transcribed it
///
/// # Errors
/// - `ScanError::Extraction` if the request fails or the API answers with an error
/// - `ScanError::NoIngredientsFound` if the model reports that no ingredients are visible
pub async fn extract(
    provider: &dyn LlmProvider,
    image: &ImagePayload,
) -> Result<String, ScanError> {
    debug!(
        "Sending {} image ({} base64 chars) to {} for extraction",
        image.media_type,
        image.data.len(),
        provider.provider_name()
    );

    let text = provider
        .send(vec![
            ContentBlock::Image {
                media_type: image.media_type.clone(),
                data: image.data.clone(),
            },
            ContentBlock::Text(EXTRACTION_PROMPT.to_string()),
        ])
        .await
        .map_err(|e| {
            warn!("Extraction request failed: {}", e);
            ScanError::Extraction(e.to_string())
        })?;

    if text.contains(NO_INGREDIENTS_SENTINEL) {
        info!("Model reported no ingredients in the image");
        return Err(ScanError::NoIngredientsFound);
    }

    debug!("Extracted ingredient text: {} characters", text.len());

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::scripted::ScriptedProvider;

    fn payload() -> ImagePayload {
        ImagePayload::new("aGVsbG8=", "image/jpeg").unwrap()
    }

    #[tokio::test]
    async fn test_extract_returns_text() {
        let provider = ScriptedProvider::new(&["Water, Sugar, Salt"]);
        let text = extract(&provider, &payload()).await.unwrap();
        assert_eq!(text, "Water, Sugar, Salt");

        let seen = provider.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0][0],
            ContentBlock::Image {
                media_type: "image/jpeg".to_string(),
                data: "aGVsbG8=".to_string()
            }
        );
        assert_eq!(seen[0][1], ContentBlock::Text(EXTRACTION_PROMPT.to_string()));
    }

    #[tokio::test]
    async fn test_extract_sentinel_exact() {
        let provider = ScriptedProvider::new(&["No ingredients found"]);
        let err = extract(&provider, &payload()).await.unwrap_err();
        assert!(matches!(err, ScanError::NoIngredientsFound));
    }

    #[tokio::test]
    async fn test_extract_sentinel_embedded() {
        let provider =
            ScriptedProvider::new(&["Sorry, the photo is blurry. No ingredients found."]);
        let err = extract(&provider, &payload()).await.unwrap_err();
        assert!(matches!(err, ScanError::NoIngredientsFound));
    }

    #[tokio::test]
    async fn test_extract_transport_failure() {
        let provider = ScriptedProvider::with_results(vec![Err(503)]);
        let err = extract(&provider, &payload()).await.unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));
    }
}
