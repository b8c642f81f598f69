use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::google_ai::{GenerationOptions, GoogleAiClient, GoogleAiError};

fn build_client() -> Result<GoogleAiClient> {
    let config = Config::load()?;
    GoogleAiClient::new(config.to_client_config())
        .context("Failed to create Gemini client. Set GEMINI_API_KEY or run 'ai-content-generator config set gemini-api-key <key>'")
}

fn describe(error: GoogleAiError) -> anyhow::Error {
    let user_message = error.user_message();
    anyhow::Error::new(error).context(user_message)
}

/// Handle generate command
pub async fn handle_generate_command(prompt: String, options: GenerationOptions) -> Result<()> {
    let client = build_client()?;

    let text = client
        .generate_content(&prompt, &options)
        .await
        .map_err(describe)?;

    println!("{text}");
    Ok(())
}

/// Handle image command
pub async fn handle_image_command(
    prompt: String,
    path: String,
    options: GenerationOptions,
) -> Result<()> {
    let client = build_client()?;

    let text = client
        .generate_content_with_image(&prompt, &path, &options)
        .await
        .map_err(describe)?;

    println!("{text}");
    Ok(())
}

/// Handle variations command
pub async fn handle_variations_command(prompt: String, count: usize) -> Result<()> {
    let client = build_client()?;

    let variations = client
        .generate_variations(&prompt, count)
        .await
        .map_err(describe)?;

    if variations.len() < count {
        println!(
            "Generated {} of {} requested variations.",
            variations.len(),
            count
        );
        println!();
    }

    for (index, text) in variations.iter().enumerate() {
        println!("--- Variation {} ---", index + 1);
        println!("{text}");
        println!();
    }

    Ok(())
}
