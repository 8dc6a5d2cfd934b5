use serde::{Deserialize, Serialize};

/// A résumé as served by `/api/resumes`. Field names follow the frontend's camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub category: String,
    pub full_text: String,
    /// Pre-rendered markup; empty for the samples.
    pub html: String,
}
