/// LLM Client — the single point of entry for remote chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the remote LLM API directly.
/// The assistant's remote stage goes through `ChatClient::complete`.
///
/// Credentials, model and base URL are passed per call: they come from the
/// per-request `ResolverConfig` snapshot, never from process globals.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Output cap sent with every completion request.
pub const MAX_TOKENS: u32 = 512;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Where and as whom a completion request is sent.
#[derive(Debug, Clone, Copy)]
pub struct ChatTarget<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any non-blank text was returned.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completion client. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
}

impl ChatClient {
    pub fn new() -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
        })
    }

    /// Sends `prompt` as a single user message and returns the reply text.
    ///
    /// No retries: a failed call is reported once and the caller decides what to do.
    pub async fn complete(&self, target: ChatTarget<'_>, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: target.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", target.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(target.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                target.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text().map(str::to_string).ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target<'a>(base_url: &'a str) -> ChatTarget<'a> {
        ChatTarget {
            base_url,
            api_key: "sk-test",
            model: "gpt-test",
        }
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-test",
                "max_tokens": 512,
                "messages": [{"role": "user", "content": "Bonjour"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Salut !"}}],
                "usage": {"prompt_tokens": 3, "completion_tokens": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new().unwrap();
        let reply = client.complete(target(&server.uri()), "Bonjour").await.unwrap();
        assert_eq!(reply, "Salut !");
    }

    #[tokio::test]
    async fn test_complete_parses_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new().unwrap();
        let err = client
            .complete(target(&server.uri()), "Bonjour")
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new().unwrap();
        let err = client
            .complete(target(&server.uri()), "Bonjour")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_text_skips_blank_content() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert!(response.text().is_none());
    }
}
