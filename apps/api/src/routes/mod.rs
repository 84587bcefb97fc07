pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route("/api/v1/mcqs", post(screening::handle_generate_mcqs))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
