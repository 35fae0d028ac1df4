use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    auth::password::hash_password,
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UserResponse},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let mut missing = Vec::new();
    if blank(&payload.username) {
        missing.push("Username");
    }
    if blank(&payload.password) {
        missing.push("Password");
    }
    if blank(&payload.email) {
        missing.push("Email");
    }
    if !missing.is_empty() {
        return Err(ApiError::validation_with_detail(
            "missing required fields",
            json!({ "missing": missing }),
        ));
    }

    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    let email = payload.email.unwrap_or_default();

    let hash = hash_password(&password).map_err(ApiError::Internal)?;

    let user = User::create(
        &state.db,
        &username,
        &hash,
        &email,
        payload.birthday,
        &payload.favorite_movies,
    )
    .await
    .map_err(ApiError::Database)?;

    info!(user_id = %user.id, %username, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}
