use std::sync::Arc;

use super::errors::GoogleAiError;
use super::failure_sink::{
    FailureContext, FailureEvent, FailureSink, Operation, TracingFailureSink,
};
use super::models::GenerationOptions;
use super::traits::ContentGenerator;

/// Temperature added per attempt index.
pub const TEMPERATURE_STEP: f32 = 0.1;

/// Runs the same prompt several times with a rising temperature and keeps
/// whatever succeeds.
///
/// Attempts run one after another and each is made exactly once. Individual
/// failures are recorded as diagnostics; only a batch with no success at all is
/// an error.
pub struct VariationGenerator<'a, G: ContentGenerator + ?Sized> {
    generator: &'a G,
    base_temperature: f32,
    failure_sink: Arc<dyn FailureSink>,
}

impl<'a, G: ContentGenerator + ?Sized> VariationGenerator<'a, G> {
    pub fn new(generator: &'a G, base_temperature: f32) -> Self {
        Self {
            generator,
            base_temperature,
            failure_sink: Arc::new(TracingFailureSink),
        }
    }

    pub fn with_failure_sink(mut self, failure_sink: Arc<dyn FailureSink>) -> Self {
        self.failure_sink = failure_sink;
        self
    }

    /// Temperature used for the zero-indexed attempt `index`.
    pub fn temperature_for(&self, index: usize) -> f32 {
        self.base_temperature + TEMPERATURE_STEP * index as f32
    }

    pub async fn generate(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<String>, GoogleAiError> {
        let result = self.generate_inner(prompt, count).await;

        if let Err(error) = &result {
            self.failure_sink.record(&FailureEvent {
                operation: Operation::GenerateVariations,
                message: error.to_string(),
                prompt: prompt.to_string(),
                context: FailureContext::Variations { count },
            });
        }

        result
    }

    async fn generate_inner(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<String>, GoogleAiError> {
        if prompt.is_empty() {
            return Err(GoogleAiError::invalid_input("Prompt cannot be empty"));
        }

        if count < 1 {
            return Err(GoogleAiError::invalid_input("Count must be at least 1"));
        }

        let mut variations = Vec::with_capacity(count);
        let mut errors = Vec::new();

        for index in 0..count {
            let options = GenerationOptions::new().with_temperature(self.temperature_for(index));
            let attempt = index + 1;

            match self.generator.generate_content(prompt, &options).await {
                Ok(content) if content.is_empty() => {
                    errors.push(format!("Empty response received for variation {attempt}"));
                }
                Ok(content) => variations.push(content),
                Err(error) => {
                    tracing::warn!(
                        model = self.generator.model_name(),
                        attempt,
                        error = %error,
                        "Variation attempt failed"
                    );
                    errors.push(format!("Error generating variation {attempt}: {error}"));
                }
            }
        }

        if variations.is_empty() {
            let message = if errors.is_empty() {
                "Failed to generate any valid variations".to_string()
            } else {
                format!(
                    "Failed to generate any valid variations: {}",
                    errors.join("; ")
                )
            };
            return Err(GoogleAiError::AllVariationsFailed { message });
        }

        tracing::debug!(
            model = self.generator.model_name(),
            requested = count,
            generated = variations.len(),
            "Generated content variations"
        );

        Ok(variations)
    }
}
