pub mod health;
pub mod resumes;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tracing::warn;

use crate::state::AppState;
use crate::store::StoreTransaction;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        .route("/about", get(health::about_handler))
        .route("/login", post(users::handle_login))
        .route(
            "/upload",
            post(resumes::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/history/:user_id", get(resumes::handle_history))
        .route("/analyze/:resume_id", get(resumes::handle_get_analysis))
        .with_state(state)
}

/// Rolls back a failed unit of work. A failing rollback is only logged; the
/// caller is already returning the original error.
pub(crate) async fn rollback(tx: Box<dyn StoreTransaction>) {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback failed: {e}");
    }
}
