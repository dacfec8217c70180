use super::text;
use crate::error::ScanError;
use crate::images_to_text::{self, ImageSource};
use crate::model::AnalysisResult;
use crate::providers::LlmProvider;

/// Extract the ingredient list from a label image, then analyze it.
///
/// The analysis only starts once extraction has returned, and uses exactly
/// the same step as typed-in text.
pub async fn process(
    provider: &dyn LlmProvider,
    source: &ImageSource,
) -> Result<AnalysisResult, ScanError> {
    let payload = images_to_text::load(source).await?;
    let ingredients = images_to_text::extract(provider, &payload).await?;
    text::analyze(provider, &ingredients).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::scripted::ScriptedProvider;

    fn base64_source() -> ImageSource {
        ImageSource::Base64 {
            data: "aGVsbG8=".to_string(),
            media_type: "image/png".to_string(),
        }
    }

    const ANALYSIS: &str = r#"{"okay": ["Salt: fine"], "concerns": [], "summary": "Simple."}"#;

    #[tokio::test]
    async fn test_image_routes_through_text_analysis() {
        let from_image = ScriptedProvider::new(&["Salt", ANALYSIS]);
        let image_result = process(&from_image, &base64_source()).await.unwrap();

        let from_text = ScriptedProvider::new(&[ANALYSIS]);
        let text_result = text::analyze(&from_text, "Salt").await.unwrap();

        assert_eq!(image_result, text_result);

        let image_requests = from_image.requests();
        let text_requests = from_text.requests();
        assert_eq!(image_requests.len(), 2);
        assert_eq!(image_requests[1], text_requests[0]);
    }

    #[tokio::test]
    async fn test_no_ingredients_skips_analysis() {
        let provider = ScriptedProvider::new(&["No ingredients found", ANALYSIS]);
        let err = process(&provider, &base64_source()).await.unwrap_err();

        assert!(matches!(err, ScanError::NoIngredientsFound));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_image_makes_no_request() {
        let provider = ScriptedProvider::new(&[]);
        let source = ImageSource::Base64 {
            data: String::new(),
            media_type: "image/png".to_string(),
        };

        let err = process(&provider, &source).await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
        assert!(provider.requests().is_empty());
    }
}
