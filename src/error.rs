use thiserror::Error;

/// Errors that can occur while scanning or analyzing an ingredient label
#[derive(Error, Debug)]
pub enum ScanError {
    /// The extraction request failed (transport error or non-2xx response)
    #[error("Ingredient extraction failed: {0}")]
    Extraction(String),

    /// The model could not find an ingredient list in the image
    #[error("No ingredients found in the image")]
    NoIngredientsFound,

    /// The analysis request failed or its reply could not be parsed
    #[error("Ingredient analysis failed: {0}")]
    Analysis(String),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ScanError {
    /// Short message suitable for the dismissable error banner
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Extraction(_) => "Failed to analyze image. Please try again.".to_string(),
            ScanError::NoIngredientsFound => {
                "Could not find ingredients in the image. Please try again with a clearer photo."
                    .to_string()
            }
            ScanError::Analysis(_) => "Failed to analyze ingredients. Please try again.".to_string(),
            ScanError::InvalidInput(msg) | ScanError::Builder(msg) => msg.clone(),
            ScanError::Config(e) => format!("Configuration error: {}", e),
        }
    }
}

/// Errors raised by an LLM provider while talking to its API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure, or a body that was not JSON
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered with an error object
    #[error("{provider} API error ({kind}): {message}")]
    Api {
        provider: String,
        kind: String,
        message: String,
    },

    /// The reply did not contain generated text at the expected path
    #[error("No generated text in {0} response")]
    MissingContent(String),

    /// The provider could not be set up (missing key, unknown name, ...)
    #[error("Provider configuration error: {0}")]
    Setup(String),
}
