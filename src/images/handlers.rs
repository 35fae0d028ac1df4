use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    extract::JsonBody,
    images::{
        dto::{UploadRequest, UploadResponse},
        services,
    },
    state::AppState,
};

pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .route("/images", get(list_images))
}

#[instrument(skip(state, payload))]
pub async fn upload_image(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut missing = Vec::new();
    if blank(&payload.image) {
        missing.push("image");
    }
    if blank(&payload.filename) {
        missing.push("filename");
    }
    if blank(&payload.mimetype) {
        missing.push("mimetype");
    }
    if !missing.is_empty() {
        return Err(ApiError::validation_with_detail(
            "Invalid image data.",
            json!({ "missing": missing }),
        ));
    }

    let image = payload.image.unwrap_or_default();
    let filename = payload.filename.unwrap_or_default();
    let mimetype = payload.mimetype.unwrap_or_default();

    let bytes = BASE64
        .decode(image.as_bytes())
        .map_err(|_| ApiError::validation("image is not valid base64"))?;

    let url = services::store_original(&state, Bytes::from(bytes), &filename, &mimetype)
        .await
        .map_err(ApiError::Storage)?;

    info!(%filename, %mimetype, "image uploaded");
    Ok(Json(UploadResponse { image_url: url }))
}

#[instrument(skip(state))]
pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let urls = services::list_thumbnail_urls(&state)
        .await
        .map_err(ApiError::Storage)?;
    Ok(Json(urls))
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}
