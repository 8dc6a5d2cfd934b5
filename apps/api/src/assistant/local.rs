use async_trait::async_trait;
use tracing::debug;

use crate::assistant::config::ResolverConfig;
use crate::assistant::stage::{AssistantStage, StageError};
use crate::process::run_command;

/// Local LLM CLI stage. Enabled iff `LLM_CMD` is configured.
///
/// Invocation is `<llm_command> <llm_args...> <prompt>` with the prompt as a
/// single argv element. Success requires exit status 0 and non-blank stdout.
pub struct LocalCliStage;

#[async_trait]
impl AssistantStage for LocalCliStage {
    fn name(&self) -> &'static str {
        "local_cli"
    }

    fn is_enabled(&self, config: &ResolverConfig) -> bool {
        config.llm_command.is_some()
    }

    async fn attempt(&self, prompt: &str, config: &ResolverConfig) -> Result<String, StageError> {
        let Some(command) = config.llm_command.as_deref() else {
            return Err(StageError::NotConfigured);
        };

        let mut args = config.llm_args.clone();
        args.push(prompt.to_string());

        let output = run_command(command, &args, None, config.llm_timeout).await?;

        if !output.success() {
            return Err(StageError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr_lossy().trim().to_string(),
            });
        }

        let reply = output.stdout_lossy().trim().to_string();
        if reply.is_empty() {
            return Err(StageError::EmptyOutput);
        }
        debug!(
            duration_ms = output.duration.as_millis() as u64,
            chars = reply.chars().count(),
            "local LLM replied"
        );
        Ok(reply)
    }
}
