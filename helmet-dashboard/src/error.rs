//! Dashboard error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Core(#[from] helmet_core::Error),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        use helmet_core::Error as Core;

        let (status, message) = match &self {
            DashboardError::Core(Core::DuplicateId { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            DashboardError::Core(Core::RecordNotFound { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            DashboardError::Core(Core::InvalidSession) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            DashboardError::Core(Core::AuthenticationFailure) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            DashboardError::Core(Core::EmailAlreadyRegistered { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            DashboardError::Core(Core::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            DashboardError::Core(Core::Storage(msg)) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            DashboardError::Core(Core::Json(e)) => {
                tracing::error!("Serialization error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            DashboardError::NotAuthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            DashboardError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            DashboardError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = json!({ "success": false, "reason": message });
        (status, axum::Json(body)).into_response()
    }
}
