use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::routes::rollback;
use crate::state::AppState;
use crate::store::{StoreError, StoreTransaction};

pub const WELCOME_BACK: &str = "Welcome back!";
pub const WELCOME_NEW: &str = "Welcome to Campus Resume Analyzer!";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i64,
}

/// POST /login
///
/// Returns the existing user with this name, or registers a new one. Any
/// string is a valid name, the empty string included.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let mut tx = state.store.begin().await?;
    match login_or_register(tx.as_mut(), &req.name).await {
        Ok(response) => {
            tx.commit().await?;
            Ok(Json(response))
        }
        Err(e) => {
            rollback(tx).await;
            Err(e.into())
        }
    }
}

async fn login_or_register(
    tx: &mut dyn StoreTransaction,
    name: &str,
) -> Result<LoginResponse, StoreError> {
    if let Some(user) = tx.find_user_by_name(name).await? {
        info!("User {} logged in", user.id);
        return Ok(LoginResponse {
            message: WELCOME_BACK.to_string(),
            user_id: user.id,
        });
    }

    let user = tx.create_user(name).await?;
    info!("Registered user {}", user.id);
    Ok(LoginResponse {
        message: WELCOME_NEW.to_string(),
        user_id: user.id,
    })
}
