use serde::Deserialize;

/// Request body for login. Field names mirror the legacy API.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
}
