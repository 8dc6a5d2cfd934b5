//! Assistant Resolver — waterfall over the configured stages.
//!
//! Order: the two upstream stages in `StageOrder`, then the rule-based stage.
//! Disabled stages are skipped, failed stages are logged and discarded, and
//! the first reply wins. Nothing is retried.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::assistant::config::{ResolverConfig, StageOrder};
use crate::assistant::fallback::RuleBasedStage;
use crate::assistant::local::LocalCliStage;
use crate::assistant::remote::RemoteApiStage;
use crate::assistant::stage::AssistantStage;
use crate::llm_client::ChatClient;

/// Wire shape of `POST /api/assistant`. Exactly one of `response`/`error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantResponse {
    pub success: bool,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl AssistantResponse {
    pub fn reply(text: String) -> Self {
        Self {
            success: true,
            response: Some(text),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(message.into()),
        }
    }
}

pub struct Resolver {
    remote: Box<dyn AssistantStage>,
    local: Box<dyn AssistantStage>,
    fallback: Box<dyn AssistantStage>,
}

impl Resolver {
    pub fn new(client: ChatClient) -> Self {
        Self::with_stages(
            Box::new(RemoteApiStage::new(client)),
            Box::new(LocalCliStage),
            Box::new(RuleBasedStage),
        )
    }

    pub fn with_stages(
        remote: Box<dyn AssistantStage>,
        local: Box<dyn AssistantStage>,
        fallback: Box<dyn AssistantStage>,
    ) -> Self {
        Self {
            remote,
            local,
            fallback,
        }
    }

    /// Stages in the order they are attempted for `order`.
    fn pipeline(&self, order: StageOrder) -> [&dyn AssistantStage; 3] {
        match order {
            StageOrder::ApiFirst => [&*self.remote, &*self.local, &*self.fallback],
            StageOrder::CliFirst => [&*self.local, &*self.remote, &*self.fallback],
        }
    }

    pub async fn resolve(&self, prompt: &str, config: &ResolverConfig) -> AssistantResponse {
        for stage in self.pipeline(config.stage_order) {
            if !stage.is_enabled(config) {
                debug!(stage = stage.name(), "assistant stage disabled, skipping");
                continue;
            }

            match stage.attempt(prompt, config).await {
                Ok(reply) => {
                    info!(stage = stage.name(), "assistant reply resolved");
                    return AssistantResponse::reply(reply);
                }
                Err(e) => {
                    warn!(stage = stage.name(), error = %e, "assistant stage failed, falling through");
                }
            }
        }

        error!("every assistant stage failed");
        AssistantResponse::failure("Erreur du serveur assistant")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::assistant::fallback::canned_reply;
    use crate::assistant::stage::StageError;

    struct Broken;

    #[async_trait]
    impl AssistantStage for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn is_enabled(&self, _config: &ResolverConfig) -> bool {
            true
        }

        async fn attempt(&self, _prompt: &str, _config: &ResolverConfig) -> Result<String, StageError> {
            Err(StageError::EmptyOutput)
        }
    }

    fn resolver() -> Resolver {
        Resolver::new(ChatClient::new().unwrap())
    }

    async fn mock_api(reply: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": reply}}]
            })))
            .mount(&server)
            .await;
        server
    }

    fn with_api(config: ResolverConfig, base_url: String) -> ResolverConfig {
        ResolverConfig {
            openai_api_key: Some("sk-test".into()),
            openai_base_url: base_url,
            ..config
        }
    }

    fn with_cli(config: ResolverConfig, script: &str) -> ResolverConfig {
        ResolverConfig {
            llm_command: Some(PathBuf::from("/bin/sh")),
            llm_args: vec!["-c".into(), script.into(), "sh".into()],
            ..config
        }
    }

    #[tokio::test]
    async fn test_no_upstream_always_succeeds() {
        let resolver = resolver();
        let config = ResolverConfig::default();
        for prompt in ["créer un cv", "bonjour", "x", "🙂 ?"] {
            let response = resolver.resolve(prompt, &config).await;
            assert!(response.success);
            assert_eq!(response.response, Some(canned_reply(prompt)));
            assert!(response.error.is_none());
        }
    }

    #[tokio::test]
    async fn test_remote_success_wins() {
        let server = mock_api("Réponse du modèle").await;
        let config = with_api(ResolverConfig::default(), server.uri());
        let response = resolver().resolve("créer un cv", &config).await;
        assert_eq!(response, AssistantResponse::reply("Réponse du modèle".into()));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_through_to_rules() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .expect(1)
            .mount(&server)
            .await;

        let config = with_api(ResolverConfig::default(), server.uri());
        let response = resolver().resolve("Comment exporter ?", &config).await;
        assert!(response.success);
        assert_eq!(response.response, Some(canned_reply("Comment exporter ?")));
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_through() {
        // Nothing listens on port 9 of localhost.
        let config = with_api(ResolverConfig::default(), "http://127.0.0.1:9".into());
        let response = resolver().resolve("aide", &config).await;
        assert!(response.success);
        assert_eq!(response.response, Some(canned_reply("aide")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_remote_failure_then_local_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = with_cli(
            with_api(ResolverConfig::default(), server.uri()),
            "echo from-cli",
        );
        let response = resolver().resolve("question", &config).await;
        assert_eq!(response.response.as_deref(), Some("from-cli"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stage_order_decides_between_two_working_upstreams() {
        let server = mock_api("from-api").await;
        let base = with_cli(
            with_api(ResolverConfig::default(), server.uri()),
            "echo from-cli",
        );

        let api_first = ResolverConfig {
            stage_order: StageOrder::ApiFirst,
            ..base.clone()
        };
        let cli_first = ResolverConfig {
            stage_order: StageOrder::CliFirst,
            ..base
        };

        let resolver = resolver();
        assert_eq!(
            resolver.resolve("q", &api_first).await.response.as_deref(),
            Some("from-api")
        );
        assert_eq!(
            resolver.resolve("q", &cli_first).await.response.as_deref(),
            Some("from-cli")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_local_failure_modes_fall_through() {
        let resolver = resolver();
        let scripts = ["exit 1", "true", "echo '  '"];
        for script in scripts {
            let config = with_cli(ResolverConfig::default(), script);
            let response = resolver.resolve("nouveau cv", &config).await;
            assert!(response.success, "script {script:?}");
            assert_eq!(response.response, Some(canned_reply("nouveau cv")));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_local_timeout_falls_through() {
        let config = ResolverConfig {
            llm_timeout: std::time::Duration::from_millis(100),
            ..with_cli(ResolverConfig::default(), "sleep 10")
        };
        let response = resolver().resolve("help", &config).await;
        assert_eq!(response.response, Some(canned_reply("help")));
    }

    #[tokio::test]
    async fn test_all_stages_failing_reports_failure() {
        let resolver = Resolver::with_stages(Box::new(Broken), Box::new(Broken), Box::new(Broken));
        let response = resolver.resolve("q", &ResolverConfig::default()).await;
        assert!(!response.success);
        assert!(response.response.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_response_serializes_both_keys() {
        let json = serde_json::to_value(AssistantResponse::reply("ok".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "response": "ok", "error": null})
        );
    }
}
