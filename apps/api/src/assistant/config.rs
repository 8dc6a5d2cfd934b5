//! Resolver configuration: an explicit, read-only snapshot built per request.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::config::{optional_env, split_args};
use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Relative order of the two upstream stages. The rule-based stage is always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageOrder {
    #[default]
    ApiFirst,
    CliFirst,
}

impl FromStr for StageOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api-first" | "api" => Ok(StageOrder::ApiFirst),
            "cli-first" | "cli" => Ok(StageOrder::CliFirst),
            other => Err(format!("unknown stage order '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub llm_command: Option<PathBuf>,
    /// Arguments placed before the prompt (e.g. `-p` for gpt4all-style CLIs).
    pub llm_args: Vec<String>,
    pub llm_timeout: Duration,
    pub stage_order: StageOrder,
}

impl Default for ResolverConfig {
    /// No upstream configured: only the rule-based stage answers.
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            llm_command: None,
            llm_args: Vec::new(),
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            stage_order: StageOrder::default(),
        }
    }
}

impl ResolverConfig {
    /// Builds a snapshot from the current process environment.
    ///
    /// Never fails: malformed optional values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let llm_timeout = match optional_env("LLM_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                warn!("LLM_TIMEOUT_SECS must be a positive integer; using default");
                defaults.llm_timeout
            }
            None => defaults.llm_timeout,
        };

        let stage_order = match optional_env("ASSISTANT_STAGE_ORDER").map(|v| v.parse()) {
            Some(Ok(order)) => order,
            Some(Err(e)) => {
                warn!("ASSISTANT_STAGE_ORDER: {e}; using api-first");
                defaults.stage_order
            }
            None => defaults.stage_order,
        };

        Self {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: optional_env("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            llm_command: optional_env("LLM_CMD").map(PathBuf::from),
            llm_args: optional_env("LLM_ARGS")
                .map(|raw| split_args(&raw))
                .unwrap_or_default(),
            llm_timeout,
            stage_order,
        }
    }
}

/// Where handlers get their `ResolverConfig` from.
#[derive(Debug, Clone)]
pub enum ResolverConfigSource {
    /// Re-read the environment on every request; changes apply without restart.
    Env,
    Fixed(ResolverConfig),
}

impl ResolverConfigSource {
    pub fn load(&self) -> ResolverConfig {
        match self {
            ResolverConfigSource::Env => ResolverConfig::from_env(),
            ResolverConfigSource::Fixed(config) => config.clone(),
        }
    }
}
