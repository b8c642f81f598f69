use std::io::ErrorKind;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::errors::GoogleAiError;

/// Declared when neither the file contents nor its extension identify an image type.
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// An image read from disk, ready to be sent as an inline data part.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub async fn load(path: &Path) -> Result<Self, GoogleAiError> {
        let bytes = read_image(path).await?;
        let data = STANDARD.encode(&bytes);

        if data.is_empty() {
            return Err(GoogleAiError::EncodingError {
                message: format!("Failed to encode image data from {}", path.display()),
            });
        }

        Ok(Self {
            mime_type: detect_mime_type(path, &bytes),
            data,
        })
    }
}

async fn read_image(path: &Path) -> Result<Vec<u8>, GoogleAiError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            Err(GoogleAiError::ResourceNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(GoogleAiError::ResourceUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Magic bytes first, then the file extension, then JPEG.
pub fn detect_mime_type(path: &Path, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        if kind.matcher_type() == infer::MatcherType::Image {
            return kind.mime_type().to_string();
        }
    }

    mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}
