//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "AICG_LOG_LEVEL";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// External API configuration
pub mod apis {
    /// Gemini API key, required for every request
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

    /// Model used for generateContent calls
    pub const GEMINI_DEFAULT_MODEL: &str = "GEMINI_DEFAULT_MODEL";

    /// Override for the API base URL (proxies, local mocks)
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
}

/// Config file location
pub mod config {
    /// Explicit path to config.toml, replacing the default under the home directory
    pub const CONFIG_PATH: &str = "AICG_CONFIG";
}
