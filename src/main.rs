use ai_content_generator::cli::Cli;
use ai_content_generator::logging::{init_logging, LoggingConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::from_env()
    };
    init_logging(logging)?;

    cli.run()
}
