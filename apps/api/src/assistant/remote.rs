use async_trait::async_trait;

use crate::assistant::config::ResolverConfig;
use crate::assistant::stage::{AssistantStage, StageError};
use crate::llm_client::{ChatClient, ChatTarget};

/// Chat-completion API stage. Enabled iff an API key is configured.
pub struct RemoteApiStage {
    client: ChatClient,
}

impl RemoteApiStage {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantStage for RemoteApiStage {
    fn name(&self) -> &'static str {
        "remote_api"
    }

    fn is_enabled(&self, config: &ResolverConfig) -> bool {
        config.openai_api_key.is_some()
    }

    async fn attempt(&self, prompt: &str, config: &ResolverConfig) -> Result<String, StageError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(StageError::NotConfigured)?;

        let target = ChatTarget {
            base_url: &config.openai_base_url,
            api_key,
            model: &config.openai_model,
        };

        Ok(self.client.complete(target, prompt).await?)
    }
}
