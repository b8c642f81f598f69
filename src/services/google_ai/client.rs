use async_trait::async_trait;
use reqwest::{Client, Response};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::errors::GoogleAiError;
use super::failure_sink::{
    FailureContext, FailureEvent, FailureSink, Operation, TracingFailureSink,
};
use super::image::InlineImage;
use super::models::{
    GenerateContentRequest, GenerateContentResponse, GenerationDefaults, GenerationOptions,
};
use super::traits::ContentGenerator;
use super::variations::VariationGenerator;
use crate::env::apis as env_vars;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct GoogleAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub defaults: GenerationDefaults,
    /// Overall request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for GoogleAiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(env_vars::GEMINI_API_KEY).unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            defaults: GenerationDefaults::default(),
            timeout: None,
        }
    }
}

impl GoogleAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Build from `GEMINI_API_KEY`, `GEMINI_DEFAULT_MODEL` and `GEMINI_BASE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = std::env::var(env_vars::GEMINI_DEFAULT_MODEL) {
            if !model.is_empty() {
                config.model = model;
            }
        }

        if let Ok(base_url) = std::env::var(env_vars::GEMINI_BASE_URL) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), GoogleAiError> {
        if self.api_key.trim().is_empty() {
            return Err(GoogleAiError::ConfigurationError {
                message: format!(
                    "Gemini API key is not set. Please set {} in your environment.",
                    env_vars::GEMINI_API_KEY
                ),
            });
        }

        if self.base_url.is_empty() {
            return Err(GoogleAiError::ConfigurationError {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        if self.model.is_empty() {
            return Err(GoogleAiError::ConfigurationError {
                message: "Model name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds no per-call state, so one instance can be cloned or shared between
/// tasks freely.
#[derive(Clone)]
pub struct GoogleAiClient {
    config: GoogleAiConfig,
    client: Client,
    failure_sink: Arc<dyn FailureSink>,
}

impl GoogleAiClient {
    pub fn new(config: GoogleAiConfig) -> Result<Self, GoogleAiError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| GoogleAiError::ConfigurationError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            client,
            failure_sink: Arc::new(TracingFailureSink),
        })
    }

    pub fn with_failure_sink(mut self, failure_sink: Arc<dyn FailureSink>) -> Self {
        self.failure_sink = failure_sink;
        self
    }

    pub fn config(&self) -> &GoogleAiConfig {
        &self.config
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    pub fn build_request(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> GenerateContentRequest {
        GenerateContentRequest::new(prompt, options.resolve(&self.config.defaults))
    }

    pub async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError> {
        let result = self.generate_text(prompt, options).await;

        if let Err(error) = &result {
            self.report(
                Operation::GenerateContent,
                error,
                prompt,
                FailureContext::Options(*options),
            );
        }

        result
    }

    pub async fn generate_content_with_image(
        &self,
        prompt: &str,
        image_path: impl AsRef<Path>,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError> {
        let image_path = image_path.as_ref();
        let result = self.generate_from_image(prompt, image_path, options).await;

        if let Err(error) = &result {
            self.report(
                Operation::GenerateContentWithImage,
                error,
                prompt,
                FailureContext::Image {
                    path: image_path.to_path_buf(),
                    options: *options,
                },
            );
        }

        result
    }

    /// Generate `count` variations of `prompt`, starting at the configured
    /// default temperature.
    pub async fn generate_variations(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<String>, GoogleAiError> {
        VariationGenerator::new(self, self.config.defaults.temperature)
            .with_failure_sink(self.failure_sink.clone())
            .generate(prompt, count)
            .await
    }

    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError> {
        if prompt.is_empty() {
            return Err(GoogleAiError::invalid_input("Prompt cannot be empty"));
        }

        self.send(self.build_request(prompt, options)).await
    }

    async fn generate_from_image(
        &self,
        prompt: &str,
        image_path: &Path,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError> {
        if prompt.is_empty() {
            return Err(GoogleAiError::invalid_input("Prompt cannot be empty"));
        }

        if image_path.as_os_str().is_empty() {
            return Err(GoogleAiError::invalid_input("Image path cannot be empty"));
        }

        let image = InlineImage::load(image_path).await?;
        tracing::debug!(
            path = %image_path.display(),
            mime_type = %image.mime_type,
            encoded_len = image.data.len(),
            "Loaded image for inline upload"
        );

        let request = self
            .build_request(prompt, options)
            .with_inline_image(image.mime_type, image.data);

        self.send(request).await
    }

    async fn send(&self, request: GenerateContentRequest) -> Result<String, GoogleAiError> {
        tracing::debug!(
            model = %self.config.model,
            temperature = request.generation_config.temperature,
            max_output_tokens = request.generation_config.max_output_tokens,
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", self.config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<String, GoogleAiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(GoogleAiError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GoogleAiError::ParseError {
                message: format!("Failed to parse response: {e}: {body}"),
            })?;

        match GenerateContentResponse::extract_text(&value) {
            Some(text) => {
                let parsed: Option<GenerateContentResponse> =
                    serde_json::from_value(value.clone()).ok();
                tracing::debug!(
                    finish_reason = parsed.as_ref().and_then(|r| r.get_finish_reason()),
                    total_tokens = parsed.as_ref().and_then(|r| r.get_token_usage()),
                    "Received generated content"
                );
                Ok(text.to_string())
            }
            None => Err(GoogleAiError::EmptyResponse {
                body: value.to_string(),
            }),
        }
    }

    fn report(
        &self,
        operation: Operation,
        error: &GoogleAiError,
        prompt: &str,
        context: FailureContext,
    ) {
        self.failure_sink.record(&FailureEvent {
            operation,
            message: error.to_string(),
            prompt: prompt.to_string(),
            context,
        });
    }
}

#[async_trait]
impl ContentGenerator for GoogleAiClient {
    async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GoogleAiError> {
        GoogleAiClient::generate_content(self, prompt, options).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
