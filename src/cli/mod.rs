pub mod config;
pub mod generate;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::services::google_ai::GenerationOptions;

#[derive(Parser)]
#[command(name = "ai-content-generator")]
#[command(about = "Generate text with Google Gemini from prompts and images")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate text from a prompt
    Generate {
        /// Prompt sent to the model
        prompt: String,
        #[command(flatten)]
        options: GenerationArgs,
    },
    /// Generate text from a prompt and an image
    Image {
        /// Prompt sent to the model
        prompt: String,
        /// Path to the image file
        path: String,
        #[command(flatten)]
        options: GenerationArgs,
    },
    /// Generate several variations of the same prompt
    Variations {
        /// Prompt sent to the model
        prompt: String,
        /// Number of variations to request (default: 3)
        #[arg(short, long, default_value_t = 3)]
        count: usize,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Per-call sampling overrides; unset flags use the configured defaults
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Maximum number of output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[arg(long)]
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff
    #[arg(long)]
    pub top_k: Option<u32>,
}

impl From<GenerationArgs> for GenerationOptions {
    fn from(args: GenerationArgs) -> Self {
        GenerationOptions {
            temperature: args.temperature,
            max_output_tokens: args.max_tokens,
            top_p: args.top_p,
            top_k: args.top_k,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective configuration (API key masked)
    Show,
    /// List values stored in the config file (API key masked)
    List,
    /// Get a config value
    Get {
        /// Config key (e.g. gemini-api-key, default-model, temperature)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Value to store
        value: String,
    },
    /// Remove a config value
    Unset {
        /// Config key
        key: String,
    },
    /// Print the config file path
    Path,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Generate { prompt, options } => {
                    generate::handle_generate_command(prompt, options.into()).await
                }
                Commands::Image {
                    prompt,
                    path,
                    options,
                } => generate::handle_image_command(prompt, path, options.into()).await,
                Commands::Variations { prompt, count } => {
                    generate::handle_variations_command(prompt, count).await
                }
                Commands::Config { command } => match command {
                    ConfigCommands::Show => config::handle_show_command(),
                    ConfigCommands::List => config::handle_list_command(),
                    ConfigCommands::Get { key } => config::handle_get_command(key),
                    ConfigCommands::Set { key, value } => config::handle_set_command(key, value),
                    ConfigCommands::Unset { key } => config::handle_unset_command(key),
                    ConfigCommands::Path => config::handle_path_command(),
                },
            }
        })
    }
}
