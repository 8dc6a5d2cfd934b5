pub mod auth;
pub mod body;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};
use tracing::info;

use crate::assistant::handlers::handle_assistant;
use crate::errors::panic_response;
use crate::render::handlers::handle_generate_pdf;
use crate::resumes::handlers::{handle_get_resume, handle_list_resumes};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/generate-pdf", post(handle_generate_pdf))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    let mut router = Router::new()
        .route("/", get(health::index_handler))
        .route("/api/health", get(health::health_handler))
        .route("/api/resumes", get(handle_list_resumes))
        .route("/api/resumes/:id", get(handle_get_resume))
        .route("/api/assistant", post(handle_assistant))
        .merge(protected);

    // Frontend build, when present
    if let Some(dir) = state.config.static_dir.as_ref().filter(|d| d.is_dir()) {
        info!("Serving static files from {}", dir.display());
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
}
