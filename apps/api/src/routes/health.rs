use axum::Json;
use serde_json::{json, Value};

pub const ABOUT_MESSAGE: &str = "Campus Resume Analyzer is a student-first tool built by and for our college warriors. \
It's designed to help you crush internships, placements, and off-campus dreams. \
Built with ❤️ and madness.";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer"
    }))
}

/// GET /about
pub async fn about_handler() -> Json<Value> {
    Json(json!({ "message": ABOUT_MESSAGE }))
}
