use async_trait::async_trait;
use thiserror::Error;

use crate::assistant::config::ResolverConfig;
use crate::llm_client::LlmError;
use crate::process::ProcessError;

/// Why a stage did not produce a reply. Always recovered by the resolver.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("process exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("process produced no output")]
    EmptyOutput,

    #[error("stage is not configured")]
    NotConfigured,
}

/// One strategy of the assistant waterfall.
///
/// `is_enabled` and `attempt` both receive the per-request config snapshot,
/// so a stage holds no configuration of its own.
#[async_trait]
pub trait AssistantStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_enabled(&self, config: &ResolverConfig) -> bool;

    async fn attempt(&self, prompt: &str, config: &ResolverConfig) -> Result<String, StageError>;
}
