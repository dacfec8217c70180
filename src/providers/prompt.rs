/// Instruction sent alongside the label photo.
///
/// Asks for the raw ingredient list only, or the [`NO_INGREDIENTS_SENTINEL`]
/// phrase when the image has none.
pub const EXTRACTION_PROMPT: &str = include_str!("extract_prompt.txt");

/// Prompt template for the structured safety analysis.
///
/// Contains an `{{INGREDIENTS}}` placeholder that is replaced with the
/// ingredient text by [`inject_ingredients`].
pub const ANALYSIS_PROMPT: &str = include_str!("analysis_prompt.txt");

/// Phrase the model answers with when it cannot find an ingredient list
pub const NO_INGREDIENTS_SENTINEL: &str = "No ingredients found";

/// Injects the ingredient text into the analysis prompt template.
pub fn inject_ingredients(ingredients: &str) -> String {
    ANALYSIS_PROMPT.replace("{{INGREDIENTS}}", ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_embedded() {
        assert!(!EXTRACTION_PROMPT.is_empty());
        assert!(!ANALYSIS_PROMPT.is_empty());
        assert!(EXTRACTION_PROMPT.contains(NO_INGREDIENTS_SENTINEL));
        assert!(ANALYSIS_PROMPT.contains("{{INGREDIENTS}}"));
    }

    #[test]
    fn test_analysis_prompt_describes_json_shape() {
        for key in ["\"okay\"", "\"concerns\"", "\"summary\"", "\"uncertainty\""] {
            assert!(ANALYSIS_PROMPT.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_inject_ingredients() {
        let prompt = inject_ingredients("Water, Sugar, Red 40");
        assert!(prompt.contains("Ingredients: Water, Sugar, Red 40"));
        assert!(!prompt.contains("{{INGREDIENTS}}"));
    }
}
