pub mod google_ai;

pub use google_ai::{
    ContentGenerator, GenerationOptions, GoogleAiClient, GoogleAiConfig, GoogleAiError,
    VariationGenerator,
};
