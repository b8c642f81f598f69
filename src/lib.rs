//! Google Gemini content generation: plain prompts, prompts with an inline
//! image, and batches of temperature-varied variations.
//!
//! ```no_run
//! use ai_content_generator::{GenerationOptions, GoogleAiClient, GoogleAiConfig};
//!
//! # async fn run() -> Result<(), ai_content_generator::GoogleAiError> {
//! let client = GoogleAiClient::new(GoogleAiConfig::new("my-api-key"))?;
//! let text = client
//!     .generate_content("Write a tagline for a bakery", &GenerationOptions::new())
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod services;

pub mod env;
pub mod logging;

pub use config::Config;
pub use logging::{init_logging, LoggingConfig};
pub use services::google_ai::{
    ContentGenerator, ErrorKind, FailureContext, FailureEvent, FailureSink, GenerationDefaults,
    GenerationOptions, GoogleAiClient, GoogleAiConfig, GoogleAiError, Operation,
    VariationGenerator,
};
