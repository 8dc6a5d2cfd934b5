use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::assistant::resolver::AssistantResponse;
use crate::errors::AppError;
use crate::routes::body::LenientJson;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /api/assistant
///
/// Blank prompts are rejected here and never reach the resolver.
pub async fn handle_assistant(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<AssistantRequest>,
) -> Result<(StatusCode, Json<AssistantResponse>), AppError> {
    let prompt = request.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(AppError::Validation("Prompt required".to_string()));
    }

    let config = state.resolver_config.load();
    let response = state.resolver.resolve(&prompt, &config).await;

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(response)))
}
