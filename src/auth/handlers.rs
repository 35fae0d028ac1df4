use axum::{extract::State, routing::post, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::LoginRequest,
        password::verify_password,
    },
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    users::repo::User,
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Confirms credentials only; no session or token is issued.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<&'static str, ApiError> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        warn!("login with blank credentials");
        return Err(ApiError::InvalidCredentials);
    }

    let user = match User::find_by_username(&state.db, &username)
        .await
        .map_err(ApiError::Internal)?
    {
        Some(u) => u,
        None => {
            warn!(%username, "login unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&password, &user.password_hash) {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = %user.id, %username, "user logged in");
    Ok("Login successful")
}
