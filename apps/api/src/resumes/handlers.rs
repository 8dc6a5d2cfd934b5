use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::resumes::catalog::{find_resume, sample_resumes};

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub success: bool,
    pub count: usize,
    pub data: &'static [Resume],
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub success: bool,
    pub data: &'static Resume,
}

/// GET /api/resumes
pub async fn handle_list_resumes() -> Json<ResumeListResponse> {
    let data = sample_resumes();
    Json(ResumeListResponse {
        success: true,
        count: data.len(),
        data,
    })
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    Path(id): Path<String>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let resume =
        find_resume(&id).ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(ResumeDetailResponse {
        success: true,
        data: resume,
    }))
}
