//! API error responses
//!
//! Every failure surfaces to the client as an opaque `{"error": "..."}`
//! body; the underlying cause only goes to the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, *message),
            ApiError::Internal { message, source } => {
                tracing::error!("{message}: {source:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, *message)
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound("Crime not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let response =
            ApiError::internal("Failed to fetch statistics", anyhow::anyhow!("pool closed"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
