//! Generator trait shared by the HTTP client and anything that wants to stand
//! in for it.

use async_trait::async_trait;

use super::errors::GoogleAiError;
use super::models::GenerationOptions;

/// Single-shot text generation from a prompt.
///
/// # Returns
/// * `Ok(String)` - non-empty generated text
/// * `Err(GoogleAiError)` - invalid input, transport or upstream failure
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError>;

    /// Model the generator sends requests to.
    fn model_name(&self) -> &str;
}
