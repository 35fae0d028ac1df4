use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Route-level failures, all rendered as one envelope: {kind, message, detail}.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        detail: Option<Value>,
    },

    /// Unknown username and wrong password are deliberately the same error.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// Document store failure. Mapped to 400: the movie-listing and
    /// user-creation clients expect 400 on a failed read/write.
    #[error("database operation failed")]
    Database(anyhow::Error),

    /// Object storage failure.
    #[error("object storage operation failed")]
    Storage(anyhow::Error),

    #[error("internal error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            detail: None,
        }
    }

    pub fn validation_with_detail(message: impl Into<String>, detail: Value) -> Self {
        Self::Validation {
            message: message.into(),
            detail: Some(detail),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. }
            | ApiError::InvalidCredentials
            | ApiError::Database(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::Database(_) | ApiError::Storage(_) => "storage",
            ApiError::Internal(_) => "internal",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        // Sources are logged here and never leak into the response body.
        match &self {
            ApiError::Database(e) | ApiError::Storage(e) | ApiError::Internal(e) => {
                tracing::error!(kind, error = %e, "request failed");
            }
            _ => {
                tracing::warn!(kind, "request rejected");
            }
        }

        let (message, detail) = match self {
            ApiError::Validation { message, detail } => (message, detail),
            other => (other.to_string(), None),
        };

        (
            status,
            Json(ErrorEnvelope {
                kind,
                message,
                detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_includes_detail_only_when_present() {
        let with = serde_json::to_value(ErrorEnvelope {
            kind: "validation",
            message: "missing required fields".into(),
            detail: Some(json!({"missing": ["Password"]})),
        })
        .unwrap();
        assert_eq!(with["kind"], "validation");
        assert_eq!(with["detail"]["missing"][0], "Password");

        let without = serde_json::to_value(ErrorEnvelope {
            kind: "internal",
            message: "internal error".into(),
            detail: None,
        })
        .unwrap();
        assert!(without.get("detail").is_none());
    }

    #[test]
    fn credential_failures_do_not_name_the_failing_half() {
        let err = ApiError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid username or password.");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_keep_the_legacy_400_contract() {
        let err = ApiError::Database(anyhow::anyhow!("pool timed out"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "storage");
    }

    #[test]
    fn object_storage_errors_are_server_errors() {
        let err = ApiError::Storage(anyhow::anyhow!("unreachable"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
