pub mod client;
pub mod errors;
pub mod failure_sink;
pub mod image;
pub mod models;
pub mod traits;
pub mod variations;

pub use client::{GoogleAiClient, GoogleAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use errors::{ErrorKind, GoogleAiError};
pub use failure_sink::{
    FailureContext, FailureEvent, FailureSink, MemoryFailureSink, NoopFailureSink, Operation,
    TracingFailureSink,
};
pub use image::{detect_mime_type, InlineImage, FALLBACK_MIME_TYPE};
pub use models::{
    Candidate, CandidateContent, CandidatePart, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, GenerationDefaults, GenerationOptions, InlineData,
    Part, UsageMetadata,
};
pub use traits::ContentGenerator;
pub use variations::{VariationGenerator, TEMPERATURE_STEP};
