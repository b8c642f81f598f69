//! Injectable hook that receives every failure raised by the client.
//!
//! Callers get an audit trail of failed generations independent of how they
//! handle the returned error. The default sink writes to `tracing`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use super::models::GenerationOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateContent,
    GenerateContentWithImage,
    GenerateVariations,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GenerateContent => "generate_content",
            Operation::GenerateContentWithImage => "generate_content_with_image",
            Operation::GenerateVariations => "generate_variations",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call-specific fields attached to a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureContext {
    Options(GenerationOptions),
    Image {
        path: PathBuf,
        options: GenerationOptions,
    },
    Variations {
        count: usize,
    },
}

impl fmt::Display for FailureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureContext::Options(options) => write!(f, "options={options:?}"),
            FailureContext::Image { path, options } => {
                write!(f, "image_path={} options={options:?}", path.display())
            }
            FailureContext::Variations { count } => write!(f, "count={count}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureEvent {
    pub operation: Operation,
    pub message: String,
    pub prompt: String,
    pub context: FailureContext,
}

pub trait FailureSink: Send + Sync {
    fn record(&self, event: &FailureEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn record(&self, event: &FailureEvent) {
        tracing::error!(
            operation = %event.operation,
            prompt = %event.prompt,
            context = %event.context,
            "Gemini API error: {}",
            event.message
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFailureSink;

impl FailureSink for NoopFailureSink {
    fn record(&self, _event: &FailureEvent) {}
}

/// Keeps every event in memory. Useful for tests and for hosts that want to
/// surface failures after a batch.
#[derive(Debug, Default)]
pub struct MemoryFailureSink {
    events: Mutex<Vec<FailureEvent>>,
}

impl MemoryFailureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FailureEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureSink for MemoryFailureSink {
    fn record(&self, event: &FailureEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
