use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /api/health
/// Returns a simple status object with the current server time.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "API Backend pour CV et Lettre de Motivation",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "resumes": "/api/resumes",
            "assistant": "/api/assistant",
            "generate_pdf": "/api/generate-pdf"
        }
    }))
}
