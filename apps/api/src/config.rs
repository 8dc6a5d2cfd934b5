use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables at startup.
///
/// The assistant's own settings (`OPENAI_*`, `LLM_*`) are NOT part of this struct:
/// they are re-read on every request through `assistant::config::ResolverConfigSource`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Shared secret for the PDF endpoint. `None` disables the check.
    pub api_key: Option<String>,
    /// Frontend build served under `/static` when the directory exists.
    pub static_dir: Option<PathBuf>,
    /// External HTML→PDF renderer (`wkhtmltopdf`, `weasyprint`, ...).
    pub pdf_render_cmd: Option<PathBuf>,
    pub pdf_render_args: Vec<String>,
    pub pdf_render_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            api_key: optional_env("API_KEY"),
            static_dir: optional_env("STATIC_DIR").map(PathBuf::from),
            pdf_render_cmd: optional_env("PDF_RENDER_CMD").map(PathBuf::from),
            pdf_render_args: optional_env("PDF_RENDER_ARGS")
                .map(|raw| split_args(&raw))
                .unwrap_or_else(|| vec!["-".to_string(), "-".to_string()]),
            pdf_render_timeout: Duration::from_secs(
                std::env::var("PDF_RENDER_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("PDF_RENDER_TIMEOUT_SECS must be a number of seconds")?,
            ),
        })
    }
}

/// Reads an environment variable, treating unset and blank values alike.
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a whitespace-separated argument list. No quoting rules: each token is one argument.
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
