use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleAiError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Image file not found: {}", .path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("Image file is not readable: {}: {source}", .path.display())]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error: {message}")]
    EncodingError { message: String },

    #[error("API request failed with status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Empty response received from Gemini API: {body}")]
    EmptyResponse { body: String },

    #[error("{message}")]
    AllVariationsFailed { message: String },

    #[error("Network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

/// Flat classification of [`GoogleAiError`], handy for matching in callers
/// that do not care about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    ResourceNotFound,
    ResourceUnreadable,
    EncodingError,
    UpstreamError,
    EmptyResponse,
    AllVariationsFailed,
    Network,
    ParseError,
    ConfigurationError,
}

impl GoogleAiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        GoogleAiError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GoogleAiError::InvalidInput { .. } => ErrorKind::InvalidInput,
            GoogleAiError::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            GoogleAiError::ResourceUnreadable { .. } => ErrorKind::ResourceUnreadable,
            GoogleAiError::EncodingError { .. } => ErrorKind::EncodingError,
            GoogleAiError::UpstreamError { .. } => ErrorKind::UpstreamError,
            GoogleAiError::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            GoogleAiError::AllVariationsFailed { .. } => ErrorKind::AllVariationsFailed,
            GoogleAiError::Network { .. } => ErrorKind::Network,
            GoogleAiError::ParseError { .. } => ErrorKind::ParseError,
            GoogleAiError::ConfigurationError { .. } => ErrorKind::ConfigurationError,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GoogleAiError::InvalidInput { .. })
    }

    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, GoogleAiError::ResourceNotFound { .. })
    }

    pub fn is_upstream_error(&self) -> bool {
        matches!(self, GoogleAiError::UpstreamError { .. })
    }

    pub fn is_empty_response(&self) -> bool {
        matches!(self, GoogleAiError::EmptyResponse { .. })
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, GoogleAiError::Network { .. })
    }

    /// HTTP status of an upstream rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GoogleAiError::UpstreamError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            GoogleAiError::InvalidInput { message } => format!("Invalid input: {message}"),
            GoogleAiError::ResourceNotFound { path } => {
                format!("Image file not found: {}", path.display())
            }
            GoogleAiError::ResourceUnreadable { path, .. } => {
                format!(
                    "Image file could not be read: {}. Check its permissions.",
                    path.display()
                )
            }
            GoogleAiError::EncodingError { .. } => {
                "The image could not be encoded for upload.".to_string()
            }
            GoogleAiError::UpstreamError { status, .. } => match status {
                401 | 403 => {
                    "Gemini API rejected the request. Please check your API key.".to_string()
                }
                429 => "Gemini API rate limit exceeded. Please wait a moment and try again."
                    .to_string(),
                500..=599 => {
                    "Gemini API is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("Gemini API request failed with status {status}."),
            },
            GoogleAiError::EmptyResponse { .. } => {
                "Gemini API returned no content for this prompt.".to_string()
            }
            GoogleAiError::AllVariationsFailed { message } => message.clone(),
            GoogleAiError::Network { .. } => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            GoogleAiError::ParseError { .. } => {
                "Error parsing Gemini API response. Please try again.".to_string()
            }
            GoogleAiError::ConfigurationError { message } => {
                format!("Configuration error: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for GoogleAiError {
    fn from(source: reqwest::Error) -> Self {
        GoogleAiError::Network { source }
    }
}
