use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::routes::body::LenientJson;
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "export.pdf";

#[derive(Debug, Default, Deserialize)]
pub struct GeneratePdfRequest {
    #[serde(default)]
    pub html: Option<String>,
    /// Older clients send the markup as `content`.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// POST /api/generate-pdf
///
/// Renders the HTML payload and returns it as a PDF attachment.
/// Guarded by the optional `API_KEY` check (see `routes::auth`).
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<GeneratePdfRequest>,
) -> Result<Response, AppError> {
    let html = request
        .html
        .filter(|h| !h.trim().is_empty())
        .or(request.content.filter(|c| !c.trim().is_empty()))
        .ok_or_else(|| AppError::Validation("HTML content required".to_string()))?;

    let filename = sanitize_filename(request.filename.as_deref());

    let pdf = state.pdf_renderer.render(&html).await?;
    info!(bytes = pdf.len(), filename = %filename, "PDF generated");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Makes a client-supplied filename safe to embed in a quoted header parameter.
fn sanitize_filename(raw: Option<&str>) -> String {
    let cleaned: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned
    }
}
