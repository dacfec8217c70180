mod ocr;

pub use ocr::extract;

use crate::error::ScanError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Represents the source of a label image
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path; the media type comes from the extension
    Path(String),
    /// Image as base64-encoded data with its media type
    Base64 { data: String, media_type: String },
}

/// An image ready to be sent to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Base64-encoded image bytes
    pub data: String,
    /// Media type such as "image/jpeg"
    pub media_type: String,
}

impl ImagePayload {
    /// Validate a base64 payload and its media type
    pub fn new(data: impl Into<String>, media_type: impl Into<String>) -> Result<Self, ScanError> {
        let data = data.into();
        let media_type = media_type.into();

        if data.trim().is_empty() {
            return Err(ScanError::InvalidInput("Image payload is empty".to_string()));
        }
        if !media_type.starts_with("image/") {
            return Err(ScanError::InvalidInput(format!(
                "Unsupported media type: '{}'",
                media_type
            )));
        }

        Ok(ImagePayload { data, media_type })
    }

    /// Encode raw image bytes
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Result<Self, ScanError> {
        if bytes.is_empty() {
            return Err(ScanError::InvalidInput("Image file is empty".to_string()));
        }
        Self::new(STANDARD.encode(bytes), media_type)
    }
}

/// Guess the image media type from a file extension
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Resolve an image source into a payload, reading the file if needed
pub async fn load(source: &ImageSource) -> Result<ImagePayload, ScanError> {
    match source {
        ImageSource::Path(path) => {
            let path = Path::new(path);
            let media_type = media_type_for_path(path).ok_or_else(|| {
                ScanError::InvalidInput(format!(
                    "Unsupported image type: {}",
                    path.display()
                ))
            })?;

            let bytes = tokio::fs::read(path).await.map_err(|e| {
                ScanError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
            })?;

            ImagePayload::from_bytes(&bytes, media_type)
        }
        ImageSource::Base64 { data, media_type } => {
            ImagePayload::new(data.as_str(), media_type.as_str())
        }
    }
}
