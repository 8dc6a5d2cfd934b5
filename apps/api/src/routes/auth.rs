use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    http::Uri,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Optional shared-secret guard. No-op unless `API_KEY` is configured; then the
/// request must carry the same value in `x-api-key` (or the `api_key` query parameter).
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| query_api_key(request.uri()));

    if provided.as_deref() != Some(expected) {
        warn!(path = %request.uri().path(), "rejected request with missing or invalid API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// `api_key` from the query string, percent-decoded.
fn query_api_key(uri: &Uri) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove("api_key")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(uri: &str) -> Option<String> {
        query_api_key(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_query_api_key_lookup() {
        assert_eq!(lookup("/api/generate-pdf?a=1&api_key=s3cret"), Some("s3cret".into()));
        assert_eq!(lookup("/api/generate-pdf?api_key="), Some(String::new()));
        assert_eq!(lookup("/api/generate-pdf?other=1"), None);
        assert_eq!(lookup("/api/generate-pdf"), None);
    }

    #[test]
    fn test_query_api_key_is_percent_decoded() {
        assert_eq!(lookup("/api/generate-pdf?api_key=s3%20cr%26t"), Some("s3 cr&t".into()));
        assert_eq!(lookup("/api/generate-pdf?api_key=s3+cr%26t&x=1"), Some("s3 cr&t".into()));
    }
}
