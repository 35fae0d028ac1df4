use serde::{Deserialize, Serialize};

/// Request body for image upload. Options so a missing field is a 400 with
/// detail instead of a bare deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64-encoded image bytes.
    pub image: Option<String>,
    pub filename: Option<String>,
    pub mimetype: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
